//! Contract-violation errors.
//!
//! These signal a mismatch between the field descriptor tree and the runtime
//! state (or a missing renderer mount target). User-input problems are never
//! reported here; they live in the error store.

/// A programming-contract violation raised by a form operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("field path is empty")]
    EmptyPath,
    #[error("field path {path:?} contains an empty segment")]
    EmptySegment { path: String },
    #[error("cannot address {path:?}: {segment:?} holds a non-container value")]
    PathConflict { path: String, segment: String },
    #[error("no field is declared at {0:?}")]
    UnknownField(String),
    #[error("{0:?} groups other fields and holds no value of its own")]
    NotAField(String),
    #[error("mount target not found: {0:?}")]
    MountTargetNotFound(String),
}
