//! `#[derive(FormSchema)]`: build an object schema from a struct definition.

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::spanned::Spanned;
use syn::{
    Data, DeriveInput, Error, Expr, Field, Fields, GenericArgument, LitStr, PathArguments, Result, Type,
};

// ---------------------------------------------------------------------------
// Field model
// ---------------------------------------------------------------------------

/// Which builder a field type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    String,
    Number { integer: bool },
    Boolean,
    /// Another `FormSchema` type, built as a nested object.
    Nested,
}

/// One `#[form(...)]` item, in declaration order.
#[derive(Clone)]
pub(crate) enum Setting {
    Label(LitStr),
    Description(LitStr),
    Placeholder(LitStr),
    Min(Expr),
    Max(Expr),
    Email,
    Url,
    Int,
    Password,
    Multiline,
    Size(Expr),
}

impl Setting {
    fn name(&self) -> &'static str {
        match self {
            Setting::Label(_) => "label",
            Setting::Description(_) => "description",
            Setting::Placeholder(_) => "placeholder",
            Setting::Min(_) => "min",
            Setting::Max(_) => "max",
            Setting::Email => "email",
            Setting::Url => "url",
            Setting::Int => "int",
            Setting::Password => "password",
            Setting::Multiline => "multiline",
            Setting::Size(_) => "size",
        }
    }
}

/// A parsed struct field.
pub(crate) struct FormField {
    pub key: String,
    pub kind: NodeKind,
    pub ty: Type,
    pub optional: bool,
    pub settings: Vec<Setting>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

pub(crate) fn parse_fields(input: &DeriveInput) -> Result<Vec<FormField>> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new(input.span(), "FormSchema can only be derived for structs"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new(
            data.fields.span(),
            "FormSchema requires a struct with named fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &named.named {
        if let Some(parsed) = parse_field(field)? {
            fields.push(parsed);
        }
    }
    Ok(fields)
}

fn parse_field(field: &Field) -> Result<Option<FormField>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| Error::new(field.span(), "expected a named field"))?;
    let mut key = ident.to_string();
    let mut skip = false;
    let mut settings = Vec::new();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            let path = &meta.path;
            let setting = if path.is_ident("skip") {
                skip = true;
                return Ok(());
            } else if path.is_ident("rename") {
                key = meta.value()?.parse::<LitStr>()?.value();
                return Ok(());
            } else if path.is_ident("label") {
                Setting::Label(meta.value()?.parse()?)
            } else if path.is_ident("description") {
                Setting::Description(meta.value()?.parse()?)
            } else if path.is_ident("placeholder") {
                Setting::Placeholder(meta.value()?.parse()?)
            } else if path.is_ident("min") {
                Setting::Min(meta.value()?.parse()?)
            } else if path.is_ident("max") {
                Setting::Max(meta.value()?.parse()?)
            } else if path.is_ident("size") {
                Setting::Size(meta.value()?.parse()?)
            } else if path.is_ident("email") {
                Setting::Email
            } else if path.is_ident("url") {
                Setting::Url
            } else if path.is_ident("int") {
                Setting::Int
            } else if path.is_ident("password") {
                Setting::Password
            } else if path.is_ident("multiline") {
                Setting::Multiline
            } else {
                return Err(meta.error(format!(
                    "unknown form attribute `{}`",
                    path.to_token_stream()
                )));
            };
            settings.push(setting);
            Ok(())
        })?;
    }

    if skip {
        return Ok(None);
    }

    let (optional, inner) = match option_inner(&field.ty) {
        Some(inner) => (true, inner.clone()),
        None => (false, field.ty.clone()),
    };
    let kind = classify(&inner);
    for setting in &settings {
        check_applicable(kind, setting, field)?;
    }

    Ok(Some(FormField {
        key,
        kind,
        ty: inner,
        optional,
        settings,
    }))
}

/// `T` when `ty` is `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn classify(ty: &Type) -> NodeKind {
    let ident = match ty {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        Type::Reference(reference) => match reference.elem.as_ref() {
            Type::Path(path) if path.path.is_ident("str") => Some("str".to_owned()),
            _ => None,
        },
        _ => None,
    };
    match ident.as_deref() {
        Some("String" | "str") => NodeKind::String,
        Some("bool") => NodeKind::Boolean,
        Some("f32" | "f64") => NodeKind::Number { integer: false },
        Some("i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128"
            | "usize") => NodeKind::Number { integer: true },
        _ => NodeKind::Nested,
    }
}

fn check_applicable(kind: NodeKind, setting: &Setting, field: &Field) -> Result<()> {
    let allowed = match setting {
        Setting::Label(_) | Setting::Description(_) | Setting::Placeholder(_) | Setting::Size(_) => true,
        Setting::Min(_) | Setting::Max(_) => matches!(kind, NodeKind::String | NodeKind::Number { .. }),
        Setting::Email | Setting::Url | Setting::Password | Setting::Multiline => kind == NodeKind::String,
        Setting::Int => matches!(kind, NodeKind::Number { .. }),
    };
    if allowed {
        Ok(())
    } else {
        Err(Error::new(
            field.ty.span(),
            format!("`{}` does not apply to this field type", setting.name()),
        ))
    }
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn generate_field(field: &FormField) -> TokenStream {
    let key = &field.key;
    let base = match field.kind {
        NodeKind::String => quote! { ::clarify::schema::string() },
        NodeKind::Number { integer: false } => quote! { ::clarify::schema::number() },
        NodeKind::Number { integer: true } => quote! { ::clarify::schema::number().int() },
        NodeKind::Boolean => quote! { ::clarify::schema::boolean() },
        NodeKind::Nested => {
            let ty = &field.ty;
            quote! { <#ty as ::clarify::schema::FormSchema>::form_schema() }
        }
    };

    let calls = field.settings.iter().map(|setting| match setting {
        Setting::Label(text) => quote! { .label(#text) },
        Setting::Description(text) => quote! { .description(#text) },
        Setting::Placeholder(text) => quote! { .placeholder(#text) },
        Setting::Size(size) => quote! { .style(#size) },
        Setting::Min(bound) if field.kind == NodeKind::String => quote! { .min((#bound) as usize) },
        Setting::Max(bound) if field.kind == NodeKind::String => quote! { .max((#bound) as usize) },
        Setting::Min(bound) => quote! { .min((#bound) as f64) },
        Setting::Max(bound) => quote! { .max((#bound) as f64) },
        Setting::Email => quote! { .email() },
        Setting::Url => quote! { .url() },
        Setting::Int => quote! { .int() },
        Setting::Password => quote! { .password() },
        Setting::Multiline => quote! { .multiline() },
    });

    let optional = field.optional.then(|| quote! { .optional() });
    quote! {
        .field(#key, {
            use ::clarify::schema::Annotate as _;
            #base #(#calls)* #optional
        })
    }
}

pub(crate) fn form_schema_impl(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let fields = parse_fields(&input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = fields.iter().map(generate_field);

    Ok(quote! {
        impl #impl_generics ::clarify::schema::FormSchema for #name #ty_generics #where_clause {
            fn form_schema() -> ::clarify::schema::ObjectSchema {
                ::clarify::schema::object() #(#fields)*
            }
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse(tokens: TokenStream) -> Result<Vec<FormField>> {
        parse_fields(&syn::parse2(tokens)?)
    }

    fn expand(tokens: TokenStream) -> String {
        form_schema_impl(tokens).unwrap().to_string()
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn classifies_field_types() {
        let fields = parse(quote! {
            struct Signup {
                name: String,
                age: u32,
                score: f64,
                terms: bool,
                nickname: Option<String>,
                address: Address,
            }
        })
        .unwrap();
        let kinds: Vec<NodeKind> = fields.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::String,
                NodeKind::Number { integer: true },
                NodeKind::Number { integer: false },
                NodeKind::Boolean,
                NodeKind::String,
                NodeKind::Nested,
            ]
        );
        assert!(fields[4].optional);
        assert!(!fields[0].optional);
    }

    #[test]
    fn rename_and_skip() {
        let fields = parse(quote! {
            struct Profile {
                #[form(rename = "firstName")]
                first_name: String,
                #[form(skip)]
                cache: Vec<u8>,
            }
        })
        .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "firstName");
    }

    #[test]
    fn settings_keep_order() {
        let fields = parse(quote! {
            struct Login {
                #[form(min = 8, password, label = "Password")]
                secret: String,
            }
        })
        .unwrap();
        let names: Vec<&str> = fields[0].settings.iter().map(Setting::name).collect();
        assert_eq!(names, vec!["min", "password", "label"]);
    }

    // -----------------------------------------------------------------------
    // Error tests
    // -----------------------------------------------------------------------

    #[test]
    fn rejects_enums() {
        let err = form_schema_impl(quote! { enum Choice { A, B } }).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn rejects_tuple_structs() {
        let err = form_schema_impl(quote! { struct Pair(String, String); }).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn rejects_unknown_attribute() {
        let err = parse(quote! {
            struct S {
                #[form(colour = "red")]
                a: String,
            }
        })
        .err()
        .unwrap();
        assert!(err.to_string().contains("unknown form attribute `colour`"));
    }

    #[test]
    fn rejects_misapplied_attribute() {
        let err = parse(quote! {
            struct S {
                #[form(email)]
                age: u8,
            }
        })
        .err()
        .unwrap();
        assert!(err.to_string().contains("`email` does not apply"));
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn generates_impl() {
        let code = expand(quote! {
            struct Signup {
                #[form(label = "Email address", email)]
                email: String,
            }
        });
        assert!(code.contains("impl :: clarify :: schema :: FormSchema for Signup"));
        assert!(code.contains(". field (\"email\""));
        assert!(code.contains(". label (\"Email address\")"));
        assert!(code.contains(". email ()"));
    }

    #[test]
    fn string_bounds_are_lengths() {
        let code = expand(quote! {
            struct S {
                #[form(min = 2, max = 40)]
                name: String,
            }
        });
        assert!(code.contains(". min ((2) as usize)"));
        assert!(code.contains(". max ((40) as usize)"));
    }

    #[test]
    fn integer_types_get_int_check() {
        let code = expand(quote! {
            struct S {
                #[form(min = 18)]
                age: u8,
            }
        });
        assert!(code.contains("number () . int ()"));
        assert!(code.contains(". min ((18) as f64)"));
    }

    #[test]
    fn option_becomes_optional() {
        let code = expand(quote! {
            struct S {
                bio: Option<String>,
            }
        });
        assert!(code.contains("string () . optional ()"));
    }

    #[test]
    fn nested_types_delegate() {
        let code = expand(quote! {
            struct S {
                address: Address,
            }
        });
        assert!(code.contains("< Address as :: clarify :: schema :: FormSchema > :: form_schema ()"));
    }
}
