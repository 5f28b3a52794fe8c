//! Declared checks on leaf schema nodes.
//!
//! Checks are kept in declaration order. Validation runs every check; the
//! introspector reads them in the same order, so a later check of the same
//! kind overrides an earlier one in the descriptor's constraint bag.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("url pattern is valid")
});

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A compiled pattern-match rule.
///
/// Equality and serialization go through the source pattern so descriptor trees
/// built from the same schema compare equal.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern from source.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `text` contains a match.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// String checks
// ---------------------------------------------------------------------------

/// The rule carried by a [`StringCheck`].
#[derive(Debug, Clone, PartialEq)]
pub enum StringRule {
    /// Minimum length in characters.
    MinLength(usize),
    /// Maximum length in characters.
    MaxLength(usize),
    /// Email address format.
    Email,
    /// Absolute URL format.
    Url,
    /// Must contain a match of the pattern.
    Regex(Pattern),
}

/// A string check with an optional custom message.
#[derive(Debug, Clone, PartialEq)]
pub struct StringCheck {
    pub rule: StringRule,
    pub message: Option<String>,
}

impl StringCheck {
    pub(crate) fn new(rule: StringRule) -> Self {
        Self {
            rule,
            message: None,
        }
    }

    /// Run the check, returning the violation message on failure.
    pub(crate) fn check(&self, text: &str) -> Option<String> {
        let passed = match &self.rule {
            StringRule::MinLength(min) => text.chars().count() >= *min,
            StringRule::MaxLength(max) => text.chars().count() <= *max,
            StringRule::Email => EMAIL.is_match(text),
            StringRule::Url => URL.is_match(text),
            StringRule::Regex(pattern) => pattern.is_match(text),
        };
        if passed {
            None
        } else {
            Some(self.message.clone().unwrap_or_else(|| self.default_message()))
        }
    }

    fn default_message(&self) -> String {
        match &self.rule {
            StringRule::MinLength(min) => format!("String must contain at least {min} character(s)"),
            StringRule::MaxLength(max) => format!("String must contain at most {max} character(s)"),
            StringRule::Email => "Invalid email".to_owned(),
            StringRule::Url => "Invalid url".to_owned(),
            StringRule::Regex(_) => "Invalid".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Number checks
// ---------------------------------------------------------------------------

/// The rule carried by a [`NumberCheck`].
#[derive(Debug, Clone, PartialEq)]
pub enum NumberRule {
    /// Lower bound, inclusive or exclusive.
    Min { value: f64, inclusive: bool },
    /// Upper bound, inclusive or exclusive.
    Max { value: f64, inclusive: bool },
    /// Must be a whole number.
    Int,
}

/// A number check with an optional custom message.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberCheck {
    pub rule: NumberRule,
    pub message: Option<String>,
}

impl NumberCheck {
    pub(crate) fn new(rule: NumberRule) -> Self {
        Self {
            rule,
            message: None,
        }
    }

    /// Run the check, returning the violation message on failure.
    pub(crate) fn check(&self, number: f64) -> Option<String> {
        let passed = match self.rule {
            NumberRule::Min { value, inclusive: true } => number >= value,
            NumberRule::Min { value, inclusive: false } => number > value,
            NumberRule::Max { value, inclusive: true } => number <= value,
            NumberRule::Max { value, inclusive: false } => number < value,
            NumberRule::Int => number.fract() == 0.0,
        };
        if passed {
            None
        } else {
            Some(self.message.clone().unwrap_or_else(|| self.default_message()))
        }
    }

    fn default_message(&self) -> String {
        match self.rule {
            NumberRule::Min { value, inclusive: true } => {
                format!("Number must be greater than or equal to {value}")
            }
            NumberRule::Min { value, inclusive: false } => {
                format!("Number must be greater than {value}")
            }
            NumberRule::Max { value, inclusive: true } => {
                format!("Number must be less than or equal to {value}")
            }
            NumberRule::Max { value, inclusive: false } => {
                format!("Number must be less than {value}")
            }
            NumberRule::Int => "Expected integer, received float".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Refinements
// ---------------------------------------------------------------------------

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A custom rule evaluated over a node's whole value.
///
/// On objects the violation can be attached to a property path, which is how
/// cross-field rules report against the field the user should fix.
#[derive(Clone)]
pub struct Refinement {
    predicate: Predicate,
    pub message: String,
    pub path: Vec<String>,
}

impl Refinement {
    pub(crate) fn new(
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
            path: Vec::new(),
        }
    }

    pub(crate) fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    /// Whether the value satisfies the rule.
    pub fn holds(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("message", &self.message)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_length_counts_chars() {
        let check = StringCheck::new(StringRule::MinLength(3));
        assert!(check.check("año").is_none());
        assert_eq!(
            check.check("ab").as_deref(),
            Some("String must contain at least 3 character(s)")
        );
    }

    #[test]
    fn custom_message_replaces_default() {
        let mut check = StringCheck::new(StringRule::MaxLength(2));
        check.message = Some("Too long".into());
        assert_eq!(check.check("abc").as_deref(), Some("Too long"));
    }

    #[test]
    fn email_format() {
        let check = StringCheck::new(StringRule::Email);
        assert!(check.check("ana@example.com").is_none());
        assert!(check.check("ana.perez+forms@mail.example.org").is_none());
        assert_eq!(check.check("ana@").as_deref(), Some("Invalid email"));
        assert!(check.check("not an email").is_some());
    }

    #[test]
    fn url_format() {
        let check = StringCheck::new(StringRule::Url);
        assert!(check.check("https://example.com/profile?id=1").is_none());
        assert_eq!(check.check("example.com").as_deref(), Some("Invalid url"));
    }

    #[test]
    fn regex_rule() {
        let pattern = Pattern::new(r"^\d{10}$").unwrap();
        let check = StringCheck::new(StringRule::Regex(pattern));
        assert!(check.check("5512345678").is_none());
        assert_eq!(check.check("55-1234").as_deref(), Some("Invalid"));
    }

    #[test]
    fn pattern_equality_uses_source() {
        assert_eq!(Pattern::new("a+").unwrap(), Pattern::new("a+").unwrap());
        assert_ne!(Pattern::new("a+").unwrap(), Pattern::new("b+").unwrap());
    }

    #[test]
    fn number_bounds() {
        let gte = NumberCheck::new(NumberRule::Min { value: 18.0, inclusive: true });
        assert!(gte.check(18.0).is_none());
        assert_eq!(
            gte.check(10.0).as_deref(),
            Some("Number must be greater than or equal to 18")
        );

        let gt = NumberCheck::new(NumberRule::Min { value: 0.0, inclusive: false });
        assert_eq!(gt.check(0.0).as_deref(), Some("Number must be greater than 0"));

        let lt = NumberCheck::new(NumberRule::Max { value: 100.0, inclusive: false });
        assert!(lt.check(99.5).is_none());
        assert_eq!(lt.check(100.0).as_deref(), Some("Number must be less than 100"));
    }

    #[test]
    fn int_rule() {
        let check = NumberCheck::new(NumberRule::Int);
        assert!(check.check(42.0).is_none());
        assert_eq!(
            check.check(4.2).as_deref(),
            Some("Expected integer, received float")
        );
    }

    #[test]
    fn refinement_holds() {
        let rule = Refinement::new(|v| v == &Value::Bool(true), "Must accept");
        assert!(rule.holds(&Value::Bool(true)));
        assert!(!rule.holds(&Value::Bool(false)));
        assert!(format!("{rule:?}").contains("Must accept"));
    }
}
