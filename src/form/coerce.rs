//! Raw input coercion.
//!
//! Renderers hand the controller whatever the input element produced. The
//! field's kind decides what gets stored; empty input is stored as "unset",
//! never as an empty string, zero or NaN.

use serde_json::{Number, Value};

use crate::descriptor::FieldKind;

/// A raw value coming from an input element.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Text typed into an input, text area or chosen in a select.
    Text(String),
    /// Checked state of a checkbox.
    Checked(bool),
    /// An already typed value (programmatic updates).
    Value(Value),
    /// No value.
    Unset,
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        RawInput::Text(text.to_owned())
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        RawInput::Text(text)
    }
}

impl From<bool> for RawInput {
    fn from(checked: bool) -> Self {
        RawInput::Checked(checked)
    }
}

impl From<i64> for RawInput {
    fn from(n: i64) -> Self {
        RawInput::Value(Value::from(n))
    }
}

impl From<i32> for RawInput {
    fn from(n: i32) -> Self {
        RawInput::Value(Value::from(n))
    }
}

impl From<f64> for RawInput {
    fn from(n: f64) -> Self {
        RawInput::Value(Value::from(n))
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        RawInput::Value(value)
    }
}

impl<T: Into<RawInput>> From<Option<T>> for RawInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawInput::Unset, Into::into)
    }
}

/// Coerce `raw` for a field of `kind`. `None` means "unset".
pub fn coerce(kind: FieldKind, raw: RawInput) -> Option<Value> {
    match kind {
        FieldKind::Checkbox => coerce_boolean(raw),
        FieldKind::Number => coerce_number(raw),
        _ => coerce_text(raw),
    }
}

fn coerce_boolean(raw: RawInput) -> Option<Value> {
    match raw {
        RawInput::Checked(checked) => Some(Value::Bool(checked)),
        RawInput::Text(text) => Some(Value::Bool(truthy_text(&text))),
        RawInput::Value(Value::String(text)) => Some(Value::Bool(truthy_text(&text))),
        RawInput::Value(Value::Number(n)) => Some(Value::Bool(n.as_f64() != Some(0.0))),
        RawInput::Value(Value::Null) | RawInput::Unset => None,
        RawInput::Value(other) => Some(other),
    }
}

fn truthy_text(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

fn coerce_number(raw: RawInput) -> Option<Value> {
    match raw {
        RawInput::Text(text) => parse_number(text),
        RawInput::Value(Value::String(text)) => parse_number(text),
        RawInput::Value(Value::Number(n)) => Some(normalize(&n)),
        RawInput::Value(Value::Null) | RawInput::Unset => None,
        RawInput::Value(other) => Some(other),
        RawInput::Checked(checked) => Some(Value::Bool(checked)),
    }
}

/// Parse typed text. Unparsable text is kept as a string so validation can
/// report the type mismatch.
fn parse_number(text: String) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(from_f64(n)),
        _ => Some(Value::String(text)),
    }
}

/// Store whole numbers as integers so `5` and `5.0` read back identically.
fn normalize(n: &Number) -> Value {
    if n.is_f64() {
        n.as_f64().map_or(Value::Number(n.clone()), from_f64)
    } else {
        Value::Number(n.clone())
    }
}

fn from_f64(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

fn coerce_text(raw: RawInput) -> Option<Value> {
    match raw {
        RawInput::Text(text) if text.is_empty() => None,
        RawInput::Text(text) => Some(Value::String(text)),
        RawInput::Value(Value::String(text)) if text.is_empty() => None,
        RawInput::Value(Value::Null) | RawInput::Unset => None,
        RawInput::Value(value) => Some(value),
        RawInput::Checked(checked) => Some(Value::Bool(checked)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn checkbox_coercion() {
        assert_eq!(coerce(FieldKind::Checkbox, true.into()), Some(json!(true)));
        assert_eq!(coerce(FieldKind::Checkbox, "on".into()), Some(json!(true)));
        assert_eq!(coerce(FieldKind::Checkbox, "off".into()), Some(json!(false)));
        assert_eq!(coerce(FieldKind::Checkbox, json!(0).into()), Some(json!(false)));
        assert_eq!(coerce(FieldKind::Checkbox, RawInput::Unset), None);
    }

    #[test]
    fn number_parses_text() {
        assert_eq!(coerce(FieldKind::Number, "42".into()), Some(json!(42)));
        assert_eq!(coerce(FieldKind::Number, " 3.5 ".into()), Some(json!(3.5)));
        assert_eq!(coerce(FieldKind::Number, "-7".into()), Some(json!(-7)));
    }

    #[test]
    fn number_empty_is_unset() {
        assert_eq!(coerce(FieldKind::Number, "".into()), None);
        assert_eq!(coerce(FieldKind::Number, "   ".into()), None);
    }

    #[test]
    fn number_garbage_kept_as_text() {
        assert_eq!(coerce(FieldKind::Number, "abc".into()), Some(json!("abc")));
        assert_eq!(coerce(FieldKind::Number, "inf".into()), Some(json!("inf")));
    }

    #[test]
    fn number_whole_floats_become_integers() {
        assert_eq!(coerce(FieldKind::Number, 5.0.into()), Some(json!(5)));
        assert_eq!(coerce(FieldKind::Number, 5_i64.into()), Some(json!(5)));
        assert_eq!(coerce(FieldKind::Number, 2.25.into()), Some(json!(2.25)));
    }

    #[test]
    fn text_empty_is_unset() {
        assert_eq!(coerce(FieldKind::Text, "".into()), None);
        assert_eq!(coerce(FieldKind::Email, json!("").into()), None);
        assert_eq!(coerce(FieldKind::Select, "MX".into()), Some(json!("MX")));
    }

    #[test]
    fn text_keeps_whitespace() {
        assert_eq!(coerce(FieldKind::Textarea, " hi ".into()), Some(json!(" hi ")));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(RawInput::from(None::<&str>), RawInput::Unset);
        assert_eq!(RawInput::from(Some("x")), RawInput::Text("x".into()));
    }

    #[test]
    fn values_pass_through_text_kinds() {
        assert_eq!(coerce(FieldKind::Text, json!(12).into()), Some(json!(12)));
    }
}
