//! Object schemas declared by Rust types.

use super::node::ObjectSchema;

/// A type that describes its own form.
///
/// Usually derived with `#[derive(FormSchema)]` (feature `macros`); a manual
/// impl just returns the object schema.
///
/// ```
/// use clarify::schema::{self, FormSchema, ObjectSchema};
///
/// struct Login;
///
/// impl FormSchema for Login {
///     fn form_schema() -> ObjectSchema {
///         schema::object()
///             .field("email", schema::string().email())
///             .field("password", schema::string().min(8).password())
///     }
/// }
///
/// assert_eq!(Login::form_schema().properties().len(), 2);
/// ```
pub trait FormSchema {
    fn form_schema() -> ObjectSchema;
}
