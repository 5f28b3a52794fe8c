//! Render-instruction node types: RenderId, RenderNode.

use serde_json::Value;
use slotmap::new_key_type;

use crate::descriptor::{Constraints, FieldDescriptor, FieldKind};

new_key_type! {
    /// Unique identifier for a render node. Copy, lightweight (u64).
    pub struct RenderId;
}

/// Class toggled on field nodes while they carry errors.
pub const HAS_ERROR_CLASS: &str = "has-error";

/// Separator used when a field's messages are shown as one line.
pub const ERROR_SEPARATOR: &str = ", ";

/// What a render node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderRole {
    /// The form container; carries whole-form errors.
    Form,
    /// A 12-column grid holding one structure level.
    Grid,
    /// A titled container for a `section` or `box` descriptor.
    Section,
    /// A single input field.
    Field,
    /// The submit control.
    Submit,
}

impl RenderRole {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderRole::Form => "form",
            RenderRole::Grid => "grid",
            RenderRole::Section => "section",
            RenderRole::Field => "field",
            RenderRole::Submit => "submit",
        }
    }
}

/// Data associated with a single render node.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub role: RenderRole,
    /// Dotted field path (sections and fields only).
    pub path: Option<String>,
    pub kind: Option<FieldKind>,
    /// Component name resolved through the registry.
    pub component: String,
    pub label: Option<String>,
    /// Grid columns occupied inside the parent grid.
    pub span: u8,
    pub classes: Vec<String>,
    pub required: bool,
    pub disabled: bool,
    pub hidden: bool,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub constraints: Constraints,
    /// Current value shown by the input.
    pub value: Option<Value>,
    /// Current error messages, in store order.
    pub errors: Vec<String>,
}

impl RenderNode {
    /// A node with the given role and no field data.
    pub fn new(role: RenderRole) -> Self {
        Self {
            role,
            path: None,
            kind: None,
            component: role.as_str().to_owned(),
            label: None,
            span: 0,
            classes: Vec::new(),
            required: false,
            disabled: false,
            hidden: false,
            placeholder: None,
            description: None,
            constraints: Constraints::default(),
            value: None,
            errors: Vec::new(),
        }
    }

    /// A field or section node mirroring `descriptor` at `path`.
    pub fn for_descriptor(path: impl Into<String>, descriptor: &FieldDescriptor) -> Self {
        let role = if descriptor.is_structural() {
            RenderRole::Section
        } else {
            RenderRole::Field
        };
        let mut node = Self::new(role);
        node.path = Some(path.into());
        node.kind = Some(descriptor.kind);
        node.component = descriptor.kind.as_str().to_owned();
        node.label = descriptor.label.clone();
        node.required = descriptor.required;
        node.disabled = descriptor.disabled;
        node.hidden = descriptor.hidden;
        node.placeholder = descriptor.placeholder.clone();
        node.description = descriptor.description.clone();
        node.constraints = descriptor.constraints.clone();
        if let Some(class_name) = descriptor.style.as_ref().and_then(|s| s.class_name.as_ref()) {
            node.add_class(class_name.clone());
        }
        node
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Replace the displayed errors and toggle the error class.
    pub fn set_errors(&mut self, errors: Vec<String>) {
        if errors.is_empty() {
            self.remove_class(HAS_ERROR_CLASS);
        } else {
            self.add_class(HAS_ERROR_CLASS);
        }
        self.errors = errors;
    }

    /// Errors as one display line, `None` when there are none.
    pub fn error_text(&self) -> Option<String> {
        (!self.errors.is_empty()).then(|| self.errors.join(ERROR_SEPARATOR))
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }
}
