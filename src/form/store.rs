//! The controller's two stores.
//!
//! Values live in a nested JSON object addressed by dotted paths. Errors are a
//! flat, insertion-ordered map from dotted path to messages; a missing key
//! means "no known errors for that path".

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// The value store: nested field values keyed by property name.
pub type Values = Map<String, Value>;

/// Error-store key for violations that apply to the whole form.
pub const ROOT_ERROR_PATH: &str = "";

/// Path-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorStore {
    entries: IndexMap<String, Vec<String>>,
}

impl ErrorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Whether any message is recorded for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Replace the entry for `path`. An empty list removes it.
    pub fn set(&mut self, path: impl Into<String>, messages: Vec<String>) {
        let path = path.into();
        if messages.is_empty() {
            self.entries.shift_remove(&path);
        } else {
            self.entries.insert(path, messages);
        }
    }

    /// Append one message to the entry for `path`.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.entries.entry(path.into()).or_default().push(message.into());
    }

    /// Remove the entry for `path`, returning whether one existed.
    pub fn clear(&mut self, path: &str) -> bool {
        self.entries.shift_remove(path).is_some()
    }

    /// Keep only the entries whose path satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|path, _| keep(path.as_str()));
    }

    /// Paths with recorded errors, in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate `(path, messages)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of paths with errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no errors are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut store = ErrorStore::new();
        store.set("age", vec!["Too young".into()]);
        assert_eq!(store.get("age"), Some(&["Too young".to_owned()][..]));
        assert!(store.contains("age"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_empty_removes() {
        let mut store = ErrorStore::new();
        store.set("age", vec!["x".into()]);
        store.set("age", Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn push_appends() {
        let mut store = ErrorStore::new();
        store.push("pw", "a");
        store.push("pw", "b");
        assert_eq!(store.get("pw").unwrap(), ["a", "b"]);
    }

    #[test]
    fn clear_reports_presence() {
        let mut store = ErrorStore::new();
        store.push("a", "x");
        assert!(store.clear("a"));
        assert!(!store.clear("a"));
    }

    #[test]
    fn order_is_insertion_order() {
        let mut store = ErrorStore::new();
        store.push("b", "1");
        store.push("a", "2");
        store.push("c", "3");
        store.clear("a");
        let paths: Vec<_> = store.paths().collect();
        assert_eq!(paths, vec!["b", "c"]);
    }

    #[test]
    fn retain_filters() {
        let mut store = ErrorStore::new();
        store.push("keep", "x");
        store.push("drop", "y");
        store.retain(|p| p == "keep");
        assert_eq!(store.paths().collect::<Vec<_>>(), vec!["keep"]);
    }

    #[test]
    fn serializes_as_map() {
        let mut store = ErrorStore::new();
        store.push("email", "Invalid email");
        assert_eq!(
            serde_json::to_string(&store).unwrap(),
            r#"{"email":["Invalid email"]}"#
        );
    }
}
