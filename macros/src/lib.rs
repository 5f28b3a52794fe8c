//! Proc macros for clarify: `#[derive(FormSchema)]`.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on `clarify`.

use proc_macro::TokenStream;

mod form_schema;

/// Derive `clarify::schema::FormSchema` for a struct with named fields.
///
/// Field types map to schema builders: `String` to `string()`, integer types
/// to `number().int()`, `f32`/`f64` to `number()`, `bool` to `boolean()`,
/// `Option<T>` to `T` made optional, and any other type to that type's own
/// `FormSchema` object.
///
/// # Attributes
///
/// - `label = "..."`, `description = "..."`, `placeholder = "..."`
/// - `min = N`, `max = N`: length bounds on strings, value bounds on numbers
/// - `email`, `url`, `password`, `multiline`: string fields only
/// - `int`: number fields only
/// - `size = N`: grid span
/// - `rename = "..."`: use a different field key
/// - `skip`: leave the field out of the form
///
/// # Example
///
/// ```ignore
/// #[derive(FormSchema)]
/// struct Signup {
///     #[form(label = "Full name", min = 2)]
///     name: String,
///     #[form(email, placeholder = "you@example.com")]
///     email: String,
///     #[form(min = 18)]
///     age: u8,
///     newsletter: Option<bool>,
/// }
/// ```
#[proc_macro_derive(FormSchema, attributes(form))]
pub fn derive_form_schema(input: TokenStream) -> TokenStream {
    form_schema::form_schema_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
