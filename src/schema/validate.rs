//! Running schema nodes against candidate values.
//!
//! [`Validate`] is the only capability the form controller needs from a schema:
//! accept a value (or nothing, when the field is unset) and return success or
//! an ordered list of [`Issue`]s.

use serde_json::Value;

use super::check::Refinement;
use super::issue::Issue;
use super::node::{EnumSchema, NumberSchema, ObjectSchema, Schema, StringSchema};

/// Message reported for an unset value on a required node.
pub const REQUIRED: &str = "Required";

/// Message reported by refinements declared without one.
pub const INVALID_INPUT: &str = "Invalid input";

/// Validate a value, `None` meaning "unset".
pub trait Validate: Send + Sync {
    fn validate(&self, value: Option<&Value>) -> Result<(), Vec<Issue>>;
}

impl<F> Validate for F
where
    F: Fn(Option<&Value>) -> Result<(), Vec<Issue>> + Send + Sync,
{
    fn validate(&self, value: Option<&Value>) -> Result<(), Vec<Issue>> {
        self(value)
    }
}

impl Validate for Schema {
    fn validate(&self, value: Option<&Value>) -> Result<(), Vec<Issue>> {
        let value = value.filter(|v| !v.is_null());
        let issues = match self {
            Schema::Optional(node) => match value {
                None => Vec::new(),
                Some(v) => return node.inner.validate(Some(v)),
            },
            Schema::Custom(node) => return node.validator.validate(value),
            _ => match value {
                None => vec![Issue::new(REQUIRED)],
                Some(v) => self.check_present(v),
            },
        };
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

impl Schema {
    /// Validate a present value against a non-wrapper node.
    fn check_present(&self, value: &Value) -> Vec<Issue> {
        match self {
            Schema::String(node) => check_string(node, value),
            Schema::Number(node) => check_number(node, value),
            Schema::Boolean(node) => match value {
                Value::Bool(_) => refine(&node.refinements, value),
                other => vec![type_mismatch("boolean", other)],
            },
            Schema::Enum(node) => check_enum(node, value),
            Schema::Object(node) => check_object(node, value),
            Schema::Optional(_) | Schema::Custom(_) => Vec::new(),
        }
    }
}

fn check_string(node: &StringSchema, value: &Value) -> Vec<Issue> {
    let Value::String(text) = value else {
        return vec![type_mismatch("string", value)];
    };
    let mut issues: Vec<Issue> = node
        .checks
        .iter()
        .filter_map(|check| check.check(text))
        .map(Issue::new)
        .collect();
    issues.extend(refine(&node.refinements, value));
    issues
}

fn check_number(node: &NumberSchema, value: &Value) -> Vec<Issue> {
    let Some(number) = value.as_f64() else {
        return vec![type_mismatch("number", value)];
    };
    let mut issues: Vec<Issue> = node
        .checks
        .iter()
        .filter_map(|check| check.check(number))
        .map(Issue::new)
        .collect();
    issues.extend(refine(&node.refinements, value));
    issues
}

fn check_enum(node: &EnumSchema, value: &Value) -> Vec<Issue> {
    let Value::String(text) = value else {
        return vec![type_mismatch("string", value)];
    };
    if !node.values.iter().any(|v| v == text) {
        let expected = node
            .values
            .iter()
            .map(|v| format!("'{v}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        return vec![Issue::new(format!(
            "Invalid enum value. Expected {expected}, received '{text}'"
        ))];
    }
    refine(&node.refinements, value)
}

fn check_object(node: &ObjectSchema, value: &Value) -> Vec<Issue> {
    let Value::Object(map) = value else {
        return vec![type_mismatch("object", value)];
    };
    let mut issues = Vec::new();
    for (key, property) in &node.properties {
        if let Err(found) = property.validate(map.get(key)) {
            issues.extend(found.into_iter().map(|issue| issue.prefixed(key)));
        }
    }
    // Cross-field rules only see objects whose properties are individually valid.
    if issues.is_empty() {
        issues = refine(&node.refinements, value);
    }
    issues
}

fn refine(refinements: &[Refinement], value: &Value) -> Vec<Issue> {
    refinements
        .iter()
        .filter(|rule| !rule.holds(value))
        .map(|rule| {
            let message = if rule.message.is_empty() {
                INVALID_INPUT.to_owned()
            } else {
                rule.message.clone()
            };
            Issue::at(rule.path.iter().cloned(), message)
        })
        .collect()
}

fn type_mismatch(expected: &str, received: &Value) -> Issue {
    Issue::new(format!(
        "Expected {expected}, received {}",
        value_type_name(received)
    ))
}

/// The JSON type name of a value.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use serde_json::json;

    use super::*;
    use crate::schema::{self, custom, Annotate, Refine};

    fn messages(result: Result<(), Vec<Issue>>) -> Vec<String> {
        result
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    // ── Leaves ───────────────────────────────────────────────────────

    #[test]
    fn unset_required_fails() {
        let node = Schema::from(schema::string());
        assert_eq!(messages(node.validate(None)), vec![REQUIRED]);
        assert_eq!(messages(node.validate(Some(&Value::Null))), vec![REQUIRED]);
    }

    #[test]
    fn type_mismatch_aborts_checks() {
        let node = Schema::from(schema::string().min(5));
        assert_eq!(
            messages(node.validate(Some(&json!(42)))),
            vec!["Expected string, received number"]
        );
    }

    #[test]
    fn all_string_checks_report_in_order() {
        let node = Schema::from(
            schema::string()
                .min(8)
                .message("Min 8")
                .regex(Regex::new("[A-Z]").unwrap())
                .message("Needs uppercase")
                .regex(Regex::new("[0-9]").unwrap())
                .message("Needs digit"),
        );
        assert_eq!(
            messages(node.validate(Some(&json!("abc")))),
            vec!["Min 8", "Needs uppercase", "Needs digit"]
        );
        assert!(node.validate(Some(&json!("Abcdefg1"))).is_ok());
    }

    #[test]
    fn number_checks() {
        let node = Schema::from(schema::number().min(18.0).message("Adults only").max(120.0));
        assert_eq!(messages(node.validate(Some(&json!(10)))), vec!["Adults only"]);
        assert!(node.validate(Some(&json!(25))).is_ok());
        assert_eq!(
            messages(node.validate(Some(&json!("25")))),
            vec!["Expected number, received string"]
        );
    }

    #[test]
    fn boolean_refinement() {
        let node = Schema::from(
            schema::boolean().refine(|v| v == &Value::Bool(true), "You must accept the terms"),
        );
        assert_eq!(
            messages(node.validate(Some(&json!(false)))),
            vec!["You must accept the terms"]
        );
        assert!(node.validate(Some(&json!(true))).is_ok());
    }

    #[test]
    fn empty_refinement_message_defaults() {
        let node = Schema::from(schema::boolean().refine(|_| false, ""));
        assert_eq!(messages(node.validate(Some(&json!(true)))), vec![INVALID_INPUT]);
    }

    #[test]
    fn enum_rejects_unknown_value() {
        let node = Schema::from(schema::enumeration(["MX", "US"]));
        assert_eq!(
            messages(node.validate(Some(&json!("ES")))),
            vec!["Invalid enum value. Expected 'MX' | 'US', received 'ES'"]
        );
        assert!(node.validate(Some(&json!("US"))).is_ok());
    }

    // ── Wrappers ─────────────────────────────────────────────────────

    #[test]
    fn optional_accepts_unset_but_checks_present() {
        let node = schema::string().max(3).optional();
        assert!(node.validate(None).is_ok());
        assert!(node.validate(Some(&Value::Null)).is_ok());
        assert_eq!(
            messages(node.validate(Some(&json!("abcd")))),
            vec!["String must contain at most 3 character(s)"]
        );
    }

    #[test]
    fn optional_of_optional() {
        let node = schema::number().optional().optional();
        assert!(node.validate(None).is_ok());
        assert!(node.validate(Some(&json!(1))).is_ok());
    }

    #[test]
    fn custom_delegates() {
        let node = Schema::from(custom("even", |value: Option<&Value>| {
            match value.and_then(Value::as_i64) {
                Some(n) if n % 2 == 0 => Ok(()),
                _ => Err(vec![Issue::new("Must be even")]),
            }
        }));
        assert!(node.validate(Some(&json!(4))).is_ok());
        assert_eq!(messages(node.validate(Some(&json!(3)))), vec!["Must be even"]);
    }

    // ── Objects ──────────────────────────────────────────────────────

    #[test]
    fn object_prefixes_paths() {
        let node = Schema::from(
            schema::object().field(
                "address",
                schema::object()
                    .field("city", schema::string())
                    .field("zip", schema::number().int()),
            ),
        );
        let issues = node
            .validate(Some(&json!({ "address": { "zip": 1.5 } })))
            .unwrap_err();
        let paths: Vec<_> = issues.iter().map(Issue::dotted_path).collect();
        assert_eq!(paths, vec!["address.city", "address.zip"]);
    }

    #[test]
    fn object_refinement_reports_at_path() {
        let node = Schema::from(
            schema::object()
                .field("password", schema::string())
                .field("confirmPassword", schema::string())
                .refine_at(
                    ["confirmPassword"],
                    |v| v["password"] == v["confirmPassword"],
                    "Passwords do not match",
                ),
        );
        let issues = node
            .validate(Some(&json!({ "password": "a", "confirmPassword": "b" })))
            .unwrap_err();
        assert_eq!(issues, vec![Issue::at(["confirmPassword"], "Passwords do not match")]);
        assert!(node
            .validate(Some(&json!({ "password": "a", "confirmPassword": "a" })))
            .is_ok());
    }

    #[test]
    fn object_refinement_skipped_when_properties_fail() {
        let node = Schema::from(
            schema::object()
                .field("a", schema::string())
                .refine(|_| false, "never"),
        );
        let issues = node.validate(Some(&json!({}))).unwrap_err();
        assert_eq!(issues, vec![Issue::at(["a"], REQUIRED)]);
    }

    #[test]
    fn object_ignores_unknown_keys() {
        let node = Schema::from(schema::object().field("a", schema::string()));
        assert!(node.validate(Some(&json!({ "a": "x", "extra": 1 }))).is_ok());
    }

    #[test]
    fn labels_do_not_affect_validation() {
        let node: Schema = schema::string().label("Name").into();
        assert!(node.validate(Some(&json!("Ana"))).is_ok());
    }
}
