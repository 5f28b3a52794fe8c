//! Built-in validation schemas: node builders, checks, issues.
//!
//! This is the validation collaborator the introspector and controller talk
//! to. The controller only ever sees it through [`Validate`]; the introspector
//! reads node kinds, checks and [`Meta`] through the inspection accessors.

pub mod check;
pub mod issue;
pub mod node;
pub mod typed;
pub mod validate;

pub use check::{NumberCheck, NumberRule, Pattern, Refinement, StringCheck, StringRule};
pub use issue::{messages, Issue};
pub use node::{
    boolean, custom, enumeration, number, object, string, Annotate, BooleanSchema, CustomSchema,
    EnumSchema, Meta, NumberSchema, ObjectSchema, OptionalSchema, Refine, Schema, StringSchema,
    TextVariant,
};
pub use typed::FormSchema;
pub use validate::{value_type_name, Validate, INVALID_INPUT, REQUIRED};

#[cfg(feature = "macros")]
pub use clarify_macros::FormSchema;
