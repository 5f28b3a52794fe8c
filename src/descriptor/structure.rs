//! The field descriptor tree: an insertion-ordered map of key to descriptor.

use indexmap::IndexMap;
use serde::Serialize;

use super::field::FieldDescriptor;

/// Separator between the segments of a dotted field path.
pub const PATH_SEPARATOR: char = '.';

/// An ordered mapping from field key to [`FieldDescriptor`].
///
/// Iteration follows declaration order, which is also render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Structure {
    fields: IndexMap<String, FieldDescriptor>,
}

impl Structure {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field (builder). Reusing a key replaces the field in place.
    pub fn with_field(mut self, key: impl Into<String>, field: FieldDescriptor) -> Self {
        self.insert(key, field);
        self
    }

    /// Append a field. Reusing a key replaces the field in place.
    pub fn insert(&mut self, key: impl Into<String>, field: FieldDescriptor) {
        self.fields.insert(key.into(), field);
    }

    /// The field at `key` on this level.
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }

    /// Resolve a dotted path through nested children.
    pub fn lookup(&self, path: &str) -> Option<&FieldDescriptor> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.children.as_ref()?.get(segment)?;
        }
        Some(current)
    }

    /// Iterate this level's fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// This level's keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields on this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether this level has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pre-order depth-first walk over every descriptor with its dotted path.
    pub fn walk(&self) -> Vec<(String, &FieldDescriptor)> {
        let mut out = Vec::new();
        walk_into(self, "", &mut out);
        out
    }

    /// Depth-first walk over non-structural descriptors only.
    pub fn leaves(&self) -> Vec<(String, &FieldDescriptor)> {
        self.walk()
            .into_iter()
            .filter(|(_, field)| !field.is_structural())
            .collect()
    }
}

fn walk_into<'a>(structure: &'a Structure, prefix: &str, out: &mut Vec<(String, &'a FieldDescriptor)>) {
    for (key, field) in structure.iter() {
        let path = join_path(prefix, key);
        out.push((path.clone(), field));
        if let Some(children) = &field.children {
            walk_into(children, &path, out);
        }
    }
}

/// Join a parent path and a key; an empty parent yields the key itself.
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}{PATH_SEPARATOR}{key}")
    }
}

impl<'a> IntoIterator for &'a Structure {
    type Item = (&'a String, &'a FieldDescriptor);
    type IntoIter = indexmap::map::Iter<'a, String, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDescriptor)> for Structure {
    fn from_iter<I: IntoIterator<Item = (K, FieldDescriptor)>>(iter: I) -> Self {
        let mut structure = Structure::new();
        for (key, field) in iter {
            structure.insert(key, field);
        }
        structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldKind;

    /// ```text
    /// name
    /// address (box)
    ///   street
    ///   geo (box)
    ///     lat
    /// notes
    /// ```
    fn build() -> Structure {
        let geo = Structure::new().with_field("lat", FieldDescriptor::new(FieldKind::Number));
        let address = Structure::new()
            .with_field("street", FieldDescriptor::new(FieldKind::Text))
            .with_field("geo", FieldDescriptor::new(FieldKind::Box).with_children(geo));
        Structure::new()
            .with_field("name", FieldDescriptor::new(FieldKind::Text))
            .with_field("address", FieldDescriptor::new(FieldKind::Box).with_children(address))
            .with_field("notes", FieldDescriptor::new(FieldKind::Textarea))
    }

    #[test]
    fn keys_keep_insertion_order() {
        let keys: Vec<_> = build().keys().map(str::to_owned).collect();
        assert_eq!(keys, vec!["name", "address", "notes"]);
    }

    #[test]
    fn lookup_nested() {
        let s = build();
        assert_eq!(s.lookup("address.geo.lat").map(|f| f.kind), Some(FieldKind::Number));
        assert_eq!(s.lookup("address").map(|f| f.kind), Some(FieldKind::Box));
        assert!(s.lookup("address.missing").is_none());
        assert!(s.lookup("name.child").is_none());
        assert!(s.lookup("").is_none());
    }

    #[test]
    fn walk_is_preorder() {
        let paths: Vec<_> = build().walk().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec!["name", "address", "address.street", "address.geo", "address.geo.lat", "notes"]
        );
    }

    #[test]
    fn leaves_skip_structural() {
        let paths: Vec<_> = build().leaves().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["name", "address.street", "address.geo.lat", "notes"]);
    }

    #[test]
    fn insert_existing_key_keeps_position() {
        let mut s = build();
        s.insert("name", FieldDescriptor::new(FieldKind::Email));
        let keys: Vec<_> = s.keys().collect();
        assert_eq!(keys, vec!["name", "address", "notes"]);
        assert_eq!(s.get("name").map(|f| f.kind), Some(FieldKind::Email));
    }

    #[test]
    fn join_path_rules() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a", "b"), "a.b");
    }

    #[test]
    fn collect_from_pairs() {
        let s: Structure = [("a", FieldDescriptor::new(FieldKind::Text))].into_iter().collect();
        assert_eq!(s.len(), 1);
    }
}
