//! Schema to field descriptor tree.

use std::sync::Arc;

use super::extract::{classify, constraints, extract};
use super::label::format_label;
use crate::descriptor::{FieldDescriptor, FieldKind, Structure};
use crate::schema::{ObjectSchema, Schema, Validate};

/// Build the field descriptor tree for an object schema.
///
/// Pure and deterministic: the same schema always yields an equal tree with
/// the same key order. Nested objects become `box` descriptors whose children
/// are introspected recursively.
pub fn introspect(schema: &ObjectSchema) -> Structure {
    schema
        .properties()
        .iter()
        .map(|(key, property)| (key.clone(), describe(key, property)))
        .collect()
}

/// Build the descriptor for a single property.
pub fn describe(key: &str, property: &Schema) -> FieldDescriptor {
    let info = extract(property);
    let kind = classify(&info);

    let mut field = FieldDescriptor::new(kind)
        .required(info.required)
        .with_constraints(constraints(info.node))
        .with_shared_validator(Arc::new(property.clone()) as Arc<dyn Validate>);

    field.label = Some(info.meta.label.clone().unwrap_or_else(|| format_label(key)));
    field.placeholder = info.meta.placeholder.clone();
    field.description = info.meta.description.clone();
    field.style = info.meta.style.clone();
    field.disabled = info.meta.disabled;
    field.hidden = info.meta.hidden;

    if kind == FieldKind::Box {
        if let Some(nested) = info.node.as_object() {
            field.children = Some(introspect(nested));
        }
    }

    tracing::trace!(key, kind = %kind, required = info.required, "described field");
    field
}
