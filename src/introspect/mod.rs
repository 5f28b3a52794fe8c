//! Schema introspector: derive a [`Structure`](crate::descriptor::Structure)
//! from an object schema.
//!
//! For each property, optional wrappers are unwrapped (any optional layer makes
//! the field not required), the innermost node is classified into a
//! [`FieldKind`](crate::descriptor::FieldKind), declared checks are collected
//! into the constraint bag and a label is derived from the key when none is
//! annotated. Unsupported nodes degrade to plain text fields.

mod extract;
pub mod label;
pub mod tree;

pub use label::format_label;
pub use tree::{describe, introspect};
