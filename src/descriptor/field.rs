//! Field descriptors and their constraint bag.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::kind::FieldKind;
use super::structure::Structure;
use crate::schema::{Pattern, Validate};

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// A numeric bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bound {
    pub value: f64,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(value: f64) -> Self {
        Self { value, inclusive: true }
    }

    pub fn exclusive(value: f64) -> Self {
        Self { value, inclusive: false }
    }
}

/// One option of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// An option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Semantic limits collected from a schema node.
///
/// Each slot holds the last declared value of its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Bound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub integer: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub url: bool,
}

impl Constraints {
    /// Whether no constraint is recorded.
    pub fn is_empty(&self) -> bool {
        *self == Constraints::default()
    }
}

// ---------------------------------------------------------------------------
// FieldStyle
// ---------------------------------------------------------------------------

/// Layout hints for the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldStyle {
    /// Grid span in a 12-column layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

// ---------------------------------------------------------------------------
// FieldDescriptor
// ---------------------------------------------------------------------------

/// One node of the field descriptor tree.
///
/// Equality compares everything except the validator's identity; only its
/// presence takes part, so two trees introspected from the same schema are
/// equal.
#[derive(Clone, Serialize)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<FieldStyle>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Structure>,
    #[serde(skip)]
    pub validator: Option<Arc<dyn Validate>>,
}

impl FieldDescriptor {
    /// A descriptor of the given kind with no label, constraints or validator.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            required: false,
            constraints: Constraints::default(),
            placeholder: None,
            description: None,
            style: None,
            disabled: false,
            hidden: false,
            children: None,
            validator: None,
        }
    }

    /// A named section grouping `children`.
    pub fn section(label: impl Into<String>, children: Structure) -> Self {
        Self::new(FieldKind::Section)
            .with_label(label)
            .with_children(children)
    }

    /// Set the label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the field required or not (builder).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the constraint bag (builder).
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Set the placeholder (builder).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the description (builder).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the layout style (builder).
    pub fn with_style(mut self, style: FieldStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Attach children (builder).
    pub fn with_children(mut self, children: Structure) -> Self {
        self.children = Some(children);
        self
    }

    /// Attach the validator used by field-level validation (builder).
    pub fn with_validator(mut self, validator: impl Validate + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Attach an already shared validator (builder).
    pub fn with_shared_validator(mut self, validator: Arc<dyn Validate>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Whether this descriptor groups children.
    pub fn is_structural(&self) -> bool {
        self.kind.is_structural()
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.label == other.label
            && self.required == other.required
            && self.constraints == other.constraints
            && self.placeholder == other.placeholder
            && self.description == other.description
            && self.style == other.style
            && self.disabled == other.disabled
            && self.hidden == other.hidden
            && self.children == other.children
            && self.validator.is_some() == other.validator.is_some()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("constraints", &self.constraints)
            .field("placeholder", &self.placeholder)
            .field("description", &self.description)
            .field("style", &self.style)
            .field("disabled", &self.disabled)
            .field("hidden", &self.hidden)
            .field("children", &self.children)
            .field("validator", &self.validator.as_ref().map(|_| "<validator>"))
            .finish()
    }
}
