//! Field kinds.

use std::fmt;

use serde::Serialize;

/// The kind of a form field.
///
/// Seven input kinds plus two structural kinds (`Section`, `Box`) that only
/// group children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    /// Multi-line text.
    Textarea,
    /// Single choice among enumerated options.
    Select,
    /// Boolean toggle.
    Checkbox,
    /// Named section grouping children under a heading.
    Section,
    /// Nested group mirroring a nested object.
    Box,
}

impl FieldKind {
    /// All kinds, in declaration order.
    pub const ALL: [FieldKind; 9] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::Textarea,
        FieldKind::Select,
        FieldKind::Checkbox,
        FieldKind::Section,
        FieldKind::Box,
    ];

    /// The lowercase name used in render output and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Section => "section",
            FieldKind::Box => "box",
        }
    }

    /// Whether this kind groups children instead of holding a value.
    pub fn is_structural(self) -> bool {
        matches!(self, FieldKind::Section | FieldKind::Box)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
