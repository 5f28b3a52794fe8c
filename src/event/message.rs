//! Events a renderer reports back to the form.

use crate::form::RawInput;

/// One of the three renderer entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// An input element changed.
    Change { path: String, input: RawInput },
    /// An input element lost focus; validates the field.
    Blur { path: String },
    /// The submit control was activated.
    Submit,
}

impl FormEvent {
    pub fn change(path: impl Into<String>, input: impl Into<RawInput>) -> Self {
        FormEvent::Change {
            path: path.into(),
            input: input.into(),
        }
    }

    pub fn blur(path: impl Into<String>) -> Self {
        FormEvent::Blur { path: path.into() }
    }

    /// The field path this event addresses, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            FormEvent::Change { path, .. } | FormEvent::Blur { path } => Some(path),
            FormEvent::Submit => None,
        }
    }
}
