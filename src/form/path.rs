//! Dotted field paths and nested value addressing.
//!
//! Writes auto-create missing intermediate containers but refuse to descend
//! through a non-container value; that situation means the value store and
//! the descriptor tree disagree and is reported as [`FormError::PathConflict`].

use std::fmt;

use serde_json::{Map, Value};

use crate::descriptor::PATH_SEPARATOR;
use crate::error::FormError;

/// A parsed, non-empty dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse `a.b.c` into segments. Empty paths and empty segments are rejected.
    pub fn parse(path: &str) -> Result<Self, FormError> {
        if path.is_empty() {
            return Err(FormError::EmptyPath);
        }
        let segments: Vec<String> = path.split(PATH_SEPARATOR).map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(FormError::EmptySegment {
                path: path.to_owned(),
            });
        }
        Ok(Self { segments })
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Split into intermediate segments and the terminal key.
    fn split(&self) -> (&[String], &String) {
        let (last, parents) = self
            .segments
            .split_last()
            .expect("parsed paths have at least one segment");
        (parents, last)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Read the value at `path`.
///
/// Returns `None` when any level is absent or an intermediate level is not an
/// object.
pub fn get<'a>(root: &'a Map<String, Value>, path: &FieldPath) -> Option<&'a Value> {
    let (parents, last) = path.split();
    let mut current = root;
    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }
    current.get(last)
}

/// Write `value` at `path`, or remove the terminal key when `value` is `None`.
///
/// Missing intermediate levels are created as empty objects on writes. A
/// removal never creates anything.
pub fn set(root: &mut Map<String, Value>, path: &FieldPath, value: Option<Value>) -> Result<(), FormError> {
    let Some(value) = value else {
        return remove(root, path);
    };
    let (parents, last) = path.split();
    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(map) => map,
            _ => {
                return Err(FormError::PathConflict {
                    path: path.to_string(),
                    segment: parents[..=depth].join("."),
                })
            }
        };
    }
    current.insert(last.clone(), value);
    Ok(())
}

fn remove(root: &mut Map<String, Value>, path: &FieldPath) -> Result<(), FormError> {
    let (parents, last) = path.split();
    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        current = match current.get_mut(segment) {
            None => return Ok(()),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(FormError::PathConflict {
                    path: path.to_string(),
                    segment: parents[..=depth].join("."),
                })
            }
        };
    }
    current.shift_remove(last);
    Ok(())
}
