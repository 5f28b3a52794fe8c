//! Field descriptor tree: kinds, constraints, ordered structure.

pub mod field;
pub mod kind;
pub mod structure;

pub use field::{Bound, Constraints, FieldDescriptor, FieldStyle, SelectOption};
pub use kind::FieldKind;
pub use structure::{join_path, Structure, PATH_SEPARATOR};
