//! Per-property information extraction: optional unwrapping, constraint
//! collection and kind classification.

use crate::descriptor::{Bound, Constraints, FieldKind, SelectOption};
use crate::schema::{Meta, NumberRule, Schema, StringRule, TextVariant};

/// What the introspector learns from one property's schema.
#[derive(Debug)]
pub(crate) struct FieldInfo<'a> {
    /// `false` if any unwrapped layer was optional.
    pub required: bool,
    /// Metadata merged across every layer, outermost annotation winning.
    pub meta: Meta,
    /// The innermost non-optional node.
    pub node: &'a Schema,
}

/// Unwrap optional layers down to the first non-optional node.
pub(crate) fn extract(schema: &Schema) -> FieldInfo<'_> {
    let mut required = true;
    let mut meta = schema.meta().clone();
    let mut node = schema;
    while let Some(inner) = node.as_optional() {
        required = false;
        meta = inner.meta().overlaid_with(&meta);
        node = inner;
    }
    FieldInfo {
        required,
        meta,
        node,
    }
}

/// Pick the field kind for an unwrapped node.
///
/// Precedence: email string, number, boolean, enumeration, object, then the
/// text variants. Anything else is plain text.
pub(crate) fn classify(info: &FieldInfo<'_>) -> FieldKind {
    match info.node {
        Schema::String(s) if s.is_email() => FieldKind::Email,
        Schema::Number(_) => FieldKind::Number,
        Schema::Boolean(_) => FieldKind::Checkbox,
        Schema::Enum(_) => FieldKind::Select,
        Schema::Object(_) => FieldKind::Box,
        Schema::String(_) => match info.meta.variant {
            Some(TextVariant::Password) => FieldKind::Password,
            Some(TextVariant::Multiline) => FieldKind::Textarea,
            None => FieldKind::Text,
        },
        other => {
            tracing::debug!(node = other.type_name(), "opaque schema node, falling back to text");
            FieldKind::Text
        }
    }
}

/// Collect range, length, pattern and option constraints.
///
/// Checks are read in declaration order, so the last declaration of a kind
/// wins.
pub(crate) fn constraints(node: &Schema) -> Constraints {
    let mut out = Constraints::default();
    match node {
        Schema::String(s) => {
            for check in s.checks() {
                match &check.rule {
                    StringRule::MinLength(n) => out.min_length = Some(*n),
                    StringRule::MaxLength(n) => out.max_length = Some(*n),
                    StringRule::Regex(pattern) => out.pattern = Some(pattern.clone()),
                    StringRule::Url => out.url = true,
                    StringRule::Email => {}
                }
            }
        }
        Schema::Number(n) => {
            for check in n.checks() {
                match check.rule {
                    NumberRule::Min { value, inclusive } => {
                        out.min = Some(Bound { value, inclusive });
                    }
                    NumberRule::Max { value, inclusive } => {
                        out.max = Some(Bound { value, inclusive });
                    }
                    NumberRule::Int => out.integer = true,
                }
            }
        }
        Schema::Enum(e) => {
            out.options = Some(e.values().iter().map(SelectOption::plain).collect());
        }
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use serde_json::Value;

    use super::*;
    use crate::schema::{self, Annotate, Issue};

    // ── extract ──────────────────────────────────────────────────────

    #[test]
    fn plain_node_is_required() {
        let node: Schema = schema::string().into();
        let info = extract(&node);
        assert!(info.required);
        assert!(matches!(info.node, Schema::String(_)));
    }

    #[test]
    fn optional_of_optional_unwraps_fully() {
        let node = schema::number().min(1.0).optional().optional();
        let info = extract(&node);
        assert!(!info.required);
        assert!(matches!(info.node, Schema::Number(_)));
    }

    #[test]
    fn outer_label_wins() {
        let node = schema::string().label("Inner").optional().label("Outer");
        assert_eq!(extract(&node).meta.label.as_deref(), Some("Outer"));

        let node = schema::string().label("Inner").optional();
        assert_eq!(extract(&node).meta.label.as_deref(), Some("Inner"));
    }

    // ── classify ─────────────────────────────────────────────────────

    fn kind_of(node: impl Into<Schema>) -> FieldKind {
        let node = node.into();
        classify(&extract(&node))
    }

    #[test]
    fn classification_precedence() {
        assert_eq!(kind_of(schema::string().email()), FieldKind::Email);
        assert_eq!(kind_of(schema::string().email().password()), FieldKind::Email);
        assert_eq!(kind_of(schema::number()), FieldKind::Number);
        assert_eq!(kind_of(schema::boolean()), FieldKind::Checkbox);
        assert_eq!(kind_of(schema::enumeration(["a"])), FieldKind::Select);
        assert_eq!(kind_of(schema::object()), FieldKind::Box);
        assert_eq!(kind_of(schema::string()), FieldKind::Text);
        assert_eq!(kind_of(schema::string().password()), FieldKind::Password);
        assert_eq!(kind_of(schema::string().multiline()), FieldKind::Textarea);
    }

    #[test]
    fn opaque_node_falls_back_to_text() {
        let node = schema::custom("anything", |_: Option<&Value>| -> Result<(), Vec<Issue>> {
            Ok(())
        });
        assert_eq!(kind_of(node), FieldKind::Text);
    }

    // ── constraints ──────────────────────────────────────────────────

    #[test]
    fn string_constraints_compose() {
        let node: Schema = schema::string()
            .min(3)
            .max(20)
            .regex(Regex::new("^[a-z]+$").unwrap())
            .into();
        let c = constraints(&node);
        assert_eq!(c.min_length, Some(3));
        assert_eq!(c.max_length, Some(20));
        assert_eq!(c.pattern.as_ref().map(|p| p.as_str()), Some("^[a-z]+$"));
    }

    #[test]
    fn last_declaration_wins() {
        let node: Schema = schema::string()
            .regex(Regex::new("first").unwrap())
            .min(2)
            .regex(Regex::new("second").unwrap())
            .min(5)
            .into();
        let c = constraints(&node);
        assert_eq!(c.min_length, Some(5));
        assert_eq!(c.pattern.as_ref().map(|p| p.as_str()), Some("second"));
    }

    #[test]
    fn number_bounds_keep_inclusivity() {
        let node: Schema = schema::number().gt(0.0).max(100.0).int().into();
        let c = constraints(&node);
        assert_eq!(c.min, Some(Bound::exclusive(0.0)));
        assert_eq!(c.max, Some(Bound::inclusive(100.0)));
        assert!(c.integer);
    }

    #[test]
    fn enum_options_use_value_as_label() {
        let node: Schema = schema::enumeration(["MX", "US"]).into();
        let c = constraints(&node);
        assert_eq!(
            c.options,
            Some(vec![SelectOption::plain("MX"), SelectOption::plain("US")])
        );
    }

    #[test]
    fn email_and_boolean_have_no_constraints() {
        let email: Schema = schema::string().email().into();
        assert!(constraints(&email).is_empty());
        let flag: Schema = schema::boolean().into();
        assert!(constraints(&flag).is_empty());
    }
}
