//! Validation issues reported by schema nodes.
//!
//! An [`Issue`] is one violation: an ordered path of property keys (empty when
//! the issue applies to the node itself) and a human-readable message.

use std::fmt;

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Property keys from the validated node down to the offending value.
    pub path: Vec<String>,
    /// Human-readable message.
    pub message: String,
}

impl Issue {
    /// Create an issue that applies to the validated node itself.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Create an issue attached to the given property path.
    pub fn at<I, S>(path: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Prepend a property key, used when an object forwards a child's issue.
    pub(crate) fn prefixed(mut self, key: &str) -> Self {
        self.path.insert(0, key.to_owned());
        self
    }

    /// The path joined with `.`, empty for node-level issues.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.dotted_path(), self.message)
        }
    }
}

/// Collect the messages of a list of issues, preserving order.
pub fn messages(issues: &[Issue]) -> Vec<String> {
    issues.iter().map(|issue| issue.message.clone()).collect()
}
