//! Building the render tree from a descriptor structure, and projecting the
//! controller's stores onto it.

use tracing::trace;

use super::node::{RenderId, RenderNode, RenderRole};
use super::registry::ComponentRegistry;
use super::tree::RenderTree;
use crate::descriptor::{join_path, FieldDescriptor, FieldKind, Structure};
use crate::form::{ErrorStore, FieldPath, Values, ROOT_ERROR_PATH};

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// Grid layout defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Columns per grid.
    pub columns: u8,
    /// Span of a field without an explicit size.
    pub default_span: u8,
    /// Span of a `box` without an explicit size.
    pub box_span: u8,
    /// Text of the submit control.
    pub submit_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            default_span: 3,
            box_span: 12,
            submit_label: "Submit".to_owned(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default field span (builder).
    pub fn with_default_span(mut self, span: u8) -> Self {
        self.default_span = span;
        self
    }

    /// Set the default box span (builder).
    pub fn with_box_span(mut self, span: u8) -> Self {
        self.box_span = span;
        self
    }

    /// Set the submit label (builder).
    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Grid span for `descriptor`: explicit size, else the box span for
    /// boxes, else the default span. Clamped to `1..=columns`.
    pub fn span_for(&self, descriptor: &FieldDescriptor) -> u8 {
        let explicit = descriptor.style.as_ref().and_then(|style| style.size);
        let span = match (explicit, descriptor.kind) {
            (Some(size), _) => size,
            (None, FieldKind::Box) => self.box_span,
            (None, _) => self.default_span,
        };
        span.clamp(1, self.columns.max(1))
    }
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Build the render tree: form root, one grid per structure level, a node per
/// descriptor and a trailing submit node.
pub fn build(structure: &Structure, layout: &LayoutConfig, components: &ComponentRegistry) -> RenderTree {
    let mut tree = RenderTree::new();
    let root = tree.insert(RenderNode::new(RenderRole::Form).with_class("clarify-form"));
    build_grid(&mut tree, root, structure, "", layout, components);

    let mut submit = RenderNode::new(RenderRole::Submit).with_class("clarify-submit");
    submit.label = Some(layout.submit_label.clone());
    submit.span = layout.columns;
    tree.insert_child(root, submit);

    trace!(nodes = tree.len(), "render tree built");
    tree
}

fn build_grid(
    tree: &mut RenderTree,
    parent: RenderId,
    structure: &Structure,
    prefix: &str,
    layout: &LayoutConfig,
    components: &ComponentRegistry,
) {
    let mut grid = RenderNode::new(RenderRole::Grid).with_class("clarify-grid");
    grid.span = layout.columns;
    let grid = tree.insert_child(parent, grid);

    for (key, descriptor) in structure {
        let path = join_path(prefix, key);
        let mut node = RenderNode::for_descriptor(path.clone(), descriptor);
        node.span = layout.span_for(descriptor);
        node.component = components.resolve(&path, key, descriptor.kind).to_owned();
        node.add_class(match node.role {
            RenderRole::Section => "clarify-section",
            _ => "clarify-field",
        });
        let id = tree.insert_child(grid, node);

        if let Some(children) = &descriptor.children {
            build_grid(tree, id, children, &path, layout, components);
        }
    }
}

// ---------------------------------------------------------------------------
// Store projection
// ---------------------------------------------------------------------------

/// Copy the error store onto the tree.
///
/// Every field node gets exactly its store entry (or none). Root-level
/// errors land on the form node.
pub fn apply_errors(tree: &mut RenderTree, errors: &ErrorStore) {
    for id in tree.walk() {
        let Some(node) = tree.get_mut(id) else {
            continue;
        };
        let key = match (node.role, node.path.as_deref()) {
            (RenderRole::Form, _) => ROOT_ERROR_PATH,
            (RenderRole::Field | RenderRole::Section, Some(path)) => path,
            _ => continue,
        };
        let messages = errors.get(key).map(<[String]>::to_vec).unwrap_or_default();
        node.set_errors(messages);
    }
}

/// Copy current values onto field nodes.
pub fn apply_values(tree: &mut RenderTree, values: &Values) {
    for id in tree.with_role(RenderRole::Field) {
        let Some(node) = tree.get_mut(id) else {
            continue;
        };
        node.value = node
            .path
            .as_deref()
            .and_then(|path| FieldPath::parse(path).ok())
            .and_then(|path| crate::form::path::get(values, &path))
            .filter(|value| !value.is_null())
            .cloned();
    }
}

/// Path of the first field node showing errors, in render order.
pub fn first_error(tree: &RenderTree) -> Option<&str> {
    tree.walk()
        .into_iter()
        .filter_map(|id| tree.get(id))
        .find(|node| node.role == RenderRole::Field && node.has_error())
        .and_then(|node| node.path.as_deref())
}

// ===========================================================================
// Tests
// ===========================================================================
