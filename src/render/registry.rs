//! Per-form component selection.
//!
//! A renderer picks the component for a field by asking the registry. An
//! override for the field itself wins over an override for its kind, which
//! wins over the kind's built-in component.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::descriptor::FieldKind;

/// Component overrides by field and by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    by_field: IndexMap<String, String>,
    by_kind: HashMap<FieldKind, String>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `component` for every field of `kind` (builder).
    pub fn with_kind(mut self, kind: FieldKind, component: impl Into<String>) -> Self {
        self.by_kind.insert(kind, component.into());
        self
    }

    /// Use `component` for the field named `field` (builder).
    ///
    /// `field` is either a dotted path or a bare key; the path is tried first.
    pub fn with_field(mut self, field: impl Into<String>, component: impl Into<String>) -> Self {
        self.by_field.insert(field.into(), component.into());
        self
    }

    /// Merge `other` into `self`; entries of `other` win.
    pub fn extend(&mut self, other: ComponentRegistry) {
        self.by_field.extend(other.by_field);
        self.by_kind.extend(other.by_kind);
    }

    /// Component for the field at `path` (whose own key is `key`).
    pub fn resolve(&self, path: &str, key: &str, kind: FieldKind) -> &str {
        self.by_field
            .get(path)
            .or_else(|| self.by_field.get(key))
            .or_else(|| self.by_kind.get(&kind))
            .map(String::as_str)
            .unwrap_or_else(|| kind.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty() && self.by_kind.is_empty()
    }
}
