//! Schema node builders.
//!
//! Nodes are declared with chained builders in the manner of the common
//! JavaScript validation libraries:
//!
//! ```
//! use clarify::schema::{self, Annotate};
//!
//! let user = schema::object()
//!     .field("firstName", schema::string().min(2).message("Too short").label("Name"))
//!     .field("age", schema::number().min(18.0).max(120.0))
//!     .field("bio", schema::string().max(500).optional());
//! assert_eq!(user.properties().len(), 3);
//! ```
//!
//! Presentation metadata (label, style, placeholder...) is carried in a plain
//! [`Meta`] field on every node.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use super::check::{NumberCheck, NumberRule, Pattern, Refinement, StringCheck, StringRule};
use super::validate::Validate;
use crate::descriptor::FieldStyle;

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

/// Presentation variant of a plain string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVariant {
    Password,
    Multiline,
}

/// Out-of-band presentation metadata attached to a schema node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub label: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub style: Option<FieldStyle>,
    pub disabled: bool,
    pub hidden: bool,
    pub variant: Option<TextVariant>,
}

impl Meta {
    /// Overlay `outer` on top of `self`: any field `outer` sets explicitly wins.
    pub(crate) fn overlaid_with(&self, outer: &Meta) -> Meta {
        Meta {
            label: outer.label.clone().or_else(|| self.label.clone()),
            description: outer.description.clone().or_else(|| self.description.clone()),
            placeholder: outer.placeholder.clone().or_else(|| self.placeholder.clone()),
            style: outer.style.clone().or_else(|| self.style.clone()),
            disabled: outer.disabled || self.disabled,
            hidden: outer.hidden || self.hidden,
            variant: outer.variant.or(self.variant),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotate / Refine
// ---------------------------------------------------------------------------

/// Builder methods shared by every schema node.
pub trait Annotate: Into<Schema> + Sized {
    /// Mutable access to the node's metadata.
    fn meta_mut(&mut self) -> &mut Meta;

    /// Set the display label.
    fn label(mut self, label: impl Into<String>) -> Self {
        self.meta_mut().label = Some(label.into());
        self
    }

    /// Set the help text shown under the input.
    fn description(mut self, description: impl Into<String>) -> Self {
        self.meta_mut().description = Some(description.into());
        self
    }

    /// Set the placeholder text.
    fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.meta_mut().placeholder = Some(placeholder.into());
        self
    }

    /// Set the grid span (1 to 12 columns).
    fn style(mut self, size: u8) -> Self {
        let meta = self.meta_mut();
        let class_name = meta.style.take().and_then(|s| s.class_name);
        meta.style = Some(FieldStyle { size: Some(size), class_name });
        self
    }

    /// Set an extra CSS class name for the renderer.
    fn class_name(mut self, class_name: impl Into<String>) -> Self {
        let meta = self.meta_mut();
        let size = meta.style.take().and_then(|s| s.size);
        meta.style = Some(FieldStyle {
            size,
            class_name: Some(class_name.into()),
        });
        self
    }

    /// Render the field disabled.
    fn disabled(mut self) -> Self {
        self.meta_mut().disabled = true;
        self
    }

    /// Keep the field out of the visible layout.
    fn hidden(mut self) -> Self {
        self.meta_mut().hidden = true;
        self
    }

    /// Wrap the node so an unset value is accepted.
    fn optional(self) -> Schema {
        Schema::Optional(OptionalSchema {
            inner: Box::new(self.into()),
            meta: Meta::default(),
        })
    }
}

/// Custom rules over a node's whole value.
pub trait Refine: Sized {
    /// Mutable access to the node's refinements.
    fn refinements_mut(&mut self) -> &mut Vec<Refinement>;

    /// Add a rule; `message` is reported when `predicate` returns `false`.
    fn refine(
        mut self,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.refinements_mut().push(Refinement::new(predicate, message));
        self
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A schema node.
#[derive(Debug, Clone)]
pub enum Schema {
    String(StringSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    Enum(EnumSchema),
    Object(ObjectSchema),
    Optional(OptionalSchema),
    Custom(CustomSchema),
}

impl Schema {
    /// The node's own metadata (not merged with wrapped nodes).
    pub fn meta(&self) -> &Meta {
        match self {
            Schema::String(s) => &s.meta,
            Schema::Number(s) => &s.meta,
            Schema::Boolean(s) => &s.meta,
            Schema::Enum(s) => &s.meta,
            Schema::Object(s) => &s.meta,
            Schema::Optional(s) => &s.meta,
            Schema::Custom(s) => &s.meta,
        }
    }

    /// The wrapped node if this is an optional wrapper.
    pub fn as_optional(&self) -> Option<&Schema> {
        match self {
            Schema::Optional(s) => Some(&s.inner),
            _ => None,
        }
    }

    /// The object node, if this is one.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Schema::Object(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the node kind, for logs.
    pub fn type_name(&self) -> &str {
        match self {
            Schema::String(_) => "string",
            Schema::Number(_) => "number",
            Schema::Boolean(_) => "boolean",
            Schema::Enum(_) => "enum",
            Schema::Object(_) => "object",
            Schema::Optional(_) => "optional",
            Schema::Custom(s) => &s.name,
        }
    }
}

impl Annotate for Schema {
    fn meta_mut(&mut self) -> &mut Meta {
        match self {
            Schema::String(s) => &mut s.meta,
            Schema::Number(s) => &mut s.meta,
            Schema::Boolean(s) => &mut s.meta,
            Schema::Enum(s) => &mut s.meta,
            Schema::Object(s) => &mut s.meta,
            Schema::Optional(s) => &mut s.meta,
            Schema::Custom(s) => &mut s.meta,
        }
    }
}

macro_rules! node_conversions {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Schema {
                fn from(node: $ty) -> Self {
                    Schema::$variant(node)
                }
            }

            impl Annotate for $ty {
                fn meta_mut(&mut self) -> &mut Meta {
                    &mut self.meta
                }
            }
        )*
    };
}

macro_rules! node_refinements {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Refine for $ty {
                fn refinements_mut(&mut self) -> &mut Vec<Refinement> {
                    &mut self.refinements
                }
            }
        )*
    };
}

node_conversions! {
    StringSchema => String,
    NumberSchema => Number,
    BooleanSchema => Boolean,
    EnumSchema => Enum,
    ObjectSchema => Object,
    OptionalSchema => Optional,
    CustomSchema => Custom,
}

node_refinements!(StringSchema, NumberSchema, BooleanSchema, EnumSchema, ObjectSchema);

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// A string node.
pub fn string() -> StringSchema {
    StringSchema::default()
}

/// A number node.
pub fn number() -> NumberSchema {
    NumberSchema::default()
}

/// A boolean node.
pub fn boolean() -> BooleanSchema {
    BooleanSchema::default()
}

/// An enumerated-value node accepting exactly one of `values`.
pub fn enumeration<I, S>(values: I) -> EnumSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumSchema {
        values: values.into_iter().map(Into::into).collect(),
        meta: Meta::default(),
        refinements: Vec::new(),
    }
}

/// An object node with no properties yet.
pub fn object() -> ObjectSchema {
    ObjectSchema::default()
}

/// An opaque node backed by a caller-supplied validator.
///
/// Introspection cannot see inside it, so it classifies as a plain text field.
pub fn custom(name: impl Into<String>, validator: impl Validate + 'static) -> CustomSchema {
    CustomSchema {
        name: name.into(),
        validator: Arc::new(validator),
        meta: Meta::default(),
    }
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

/// A string node and its checks.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    pub(crate) checks: Vec<StringCheck>,
    pub(crate) meta: Meta,
    pub(crate) refinements: Vec<Refinement>,
}

impl StringSchema {
    fn push(mut self, rule: StringRule) -> Self {
        self.checks.push(StringCheck::new(rule));
        self
    }

    /// Minimum length in characters.
    pub fn min(self, len: usize) -> Self {
        self.push(StringRule::MinLength(len))
    }

    /// Maximum length in characters.
    pub fn max(self, len: usize) -> Self {
        self.push(StringRule::MaxLength(len))
    }

    /// Require an email address.
    pub fn email(self) -> Self {
        self.push(StringRule::Email)
    }

    /// Require an absolute URL.
    pub fn url(self) -> Self {
        self.push(StringRule::Url)
    }

    /// Require a match of `regex`.
    pub fn regex(self, regex: Regex) -> Self {
        self.push(StringRule::Regex(Pattern::from(regex)))
    }

    /// Override the message of the most recently declared check.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(check) = self.checks.last_mut() {
            check.message = Some(message.into());
        }
        self
    }

    /// Render as a masked password input.
    pub fn password(mut self) -> Self {
        self.meta.variant = Some(TextVariant::Password);
        self
    }

    /// Render as a multi-line text area.
    pub fn multiline(mut self) -> Self {
        self.meta.variant = Some(TextVariant::Multiline);
        self
    }

    /// Declared checks, in declaration order.
    pub fn checks(&self) -> &[StringCheck] {
        &self.checks
    }

    /// Whether an email-format check is declared.
    pub fn is_email(&self) -> bool {
        self.checks.iter().any(|c| c.rule == StringRule::Email)
    }
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

/// A number node and its checks.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    pub(crate) checks: Vec<NumberCheck>,
    pub(crate) meta: Meta,
    pub(crate) refinements: Vec<Refinement>,
}

impl NumberSchema {
    fn push(mut self, rule: NumberRule) -> Self {
        self.checks.push(NumberCheck::new(rule));
        self
    }

    /// Inclusive lower bound.
    pub fn min(self, value: f64) -> Self {
        self.push(NumberRule::Min { value, inclusive: true })
    }

    /// Inclusive upper bound.
    pub fn max(self, value: f64) -> Self {
        self.push(NumberRule::Max { value, inclusive: true })
    }

    /// Exclusive lower bound.
    pub fn gt(self, value: f64) -> Self {
        self.push(NumberRule::Min { value, inclusive: false })
    }

    /// Exclusive upper bound.
    pub fn lt(self, value: f64) -> Self {
        self.push(NumberRule::Max { value, inclusive: false })
    }

    /// Strictly greater than zero.
    pub fn positive(self) -> Self {
        self.gt(0.0)
    }

    /// Greater than or equal to zero.
    pub fn nonnegative(self) -> Self {
        self.min(0.0)
    }

    /// Require a whole number.
    pub fn int(self) -> Self {
        self.push(NumberRule::Int)
    }

    /// Override the message of the most recently declared check.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(check) = self.checks.last_mut() {
            check.message = Some(message.into());
        }
        self
    }

    /// Declared checks, in declaration order.
    pub fn checks(&self) -> &[NumberCheck] {
        &self.checks
    }
}

// ---------------------------------------------------------------------------
// Boolean / Enum
// ---------------------------------------------------------------------------

/// A boolean node.
#[derive(Debug, Clone, Default)]
pub struct BooleanSchema {
    pub(crate) meta: Meta,
    pub(crate) refinements: Vec<Refinement>,
}

/// An enumerated-value node.
#[derive(Debug, Clone, Default)]
pub struct EnumSchema {
    pub(crate) values: Vec<String>,
    pub(crate) meta: Meta,
    pub(crate) refinements: Vec<Refinement>,
}

impl EnumSchema {
    /// The accepted values, in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// An object node: ordered named properties plus cross-field rules.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    pub(crate) properties: IndexMap<String, Schema>,
    pub(crate) meta: Meta,
    pub(crate) refinements: Vec<Refinement>,
}

impl ObjectSchema {
    /// Declare a property. Redeclaring a key replaces it in place.
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.properties.insert(key.into(), schema.into());
        self
    }

    /// Add a cross-field rule whose violation is reported at `path`.
    pub fn refine_at<I, S>(
        mut self,
        path: I,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.into_iter().map(Into::into).collect();
        self.refinements
            .push(Refinement::new(predicate, message).with_path(path));
        self
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> &IndexMap<String, Schema> {
        &self.properties
    }
}

// ---------------------------------------------------------------------------
// Optional / Custom
// ---------------------------------------------------------------------------

/// Wrapper that accepts an unset value.
#[derive(Debug, Clone)]
pub struct OptionalSchema {
    pub(crate) inner: Box<Schema>,
    pub(crate) meta: Meta,
}

/// A node validated by an opaque caller-supplied validator.
#[derive(Clone)]
pub struct CustomSchema {
    pub(crate) name: String,
    pub(crate) validator: Arc<dyn Validate>,
    pub(crate) meta: Meta,
}

impl fmt::Debug for CustomSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomSchema")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}
