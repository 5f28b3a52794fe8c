//! Render-instruction tree: arena, layout, error projection, component
//! selection and the renderer seam.

pub mod build;
pub mod node;
pub mod registry;
pub mod renderer;
pub mod tree;

pub use build::{apply_errors, apply_values, build, first_error, LayoutConfig};
pub use node::{RenderId, RenderNode, RenderRole, ERROR_SEPARATOR, HAS_ERROR_CLASS};
pub use registry::ComponentRegistry;
pub use renderer::Renderer;
pub use tree::RenderTree;
