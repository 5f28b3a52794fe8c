//! # clarify
//!
//! Schema-driven forms: turn a validation schema into a field descriptor tree,
//! then drive a path-addressed form controller over it.
//!
//! clarify introspects an object schema (strings, numbers, booleans,
//! enumerations, nested objects, optional wrappers) into an ordered tree of
//! field descriptors with kinds, labels and constraints. A controller keeps
//! the value and error stores keyed by dotted paths, coerces raw input,
//! validates fields on demand and enforces cross-field rules on submit. A
//! render-instruction tree is handed to an external renderer.
//!
//! ## Core Systems
//!
//! - **[`schema`]**: Validation schemas: builders, checks, issues, the `Validate` seam
//! - **[`descriptor`]**: Field descriptors, kinds, constraints, ordered structure
//! - **[`introspect`]**: Schema to descriptor tree
//! - **[`form`]**: Controller, value/error stores, path addressing, coercion
//! - **[`event`]**: Renderer events and the event queue
//! - **[`render`]**: Slotmap-backed render tree, grid layout, component registry
//! - **[`session`]**: `Form`: controller and render tree wired together
//! - **[`testing`]**: Headless `FormPilot` and text snapshots
//!
//! ## Example
//!
//! ```
//! use clarify::schema::{self, Annotate};
//! use clarify::session::{Form, FormConfig};
//! use clarify::event::FormEvent;
//!
//! let signup = schema::object()
//!     .field("email", schema::string().email().label("Email"))
//!     .field("age", schema::number().min(18.0));
//!
//! let mut form = Form::from_schema(signup, FormConfig::new());
//! form.dispatch(FormEvent::change("age", "16")).unwrap();
//! form.dispatch(FormEvent::blur("age")).unwrap();
//! assert_eq!(
//!     form.get_errors().get("age"),
//!     Some(&["Number must be greater than or equal to 18".to_owned()][..]),
//! );
//! ```

// Foundation
pub mod error;
pub mod schema;

// Field descriptors
pub mod descriptor;
pub mod introspect;

// State and events
pub mod event;
pub mod form;

// Rendering
pub mod render;

// Session
pub mod session;
pub mod testing;

pub use error::FormError;
pub use session::{Form, FormConfig};
