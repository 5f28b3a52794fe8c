//! The render-instruction tree, backed by a slotmap arena.

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{RenderId, RenderNode, RenderRole};

const EMPTY_CHILDREN: &[RenderId] = &[];

/// Renderer-facing tree: form root, grids, sections, fields and submit.
///
/// Nodes live in a `SlotMap`; parent/child links sit in secondary maps.
/// Field and section nodes are indexed by their dotted path.
#[derive(Debug, Clone, Default)]
pub struct RenderTree {
    nodes: SlotMap<RenderId, RenderNode>,
    children: SecondaryMap<RenderId, Vec<RenderId>>,
    parent: SecondaryMap<RenderId, RenderId>,
    root: Option<RenderId>,
    by_path: HashMap<String, RenderId>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parentless node. The first one becomes the root.
    pub fn insert(&mut self, node: RenderNode) -> RenderId {
        let id = self.add(node);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert `node` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: RenderId, node: RenderNode) -> RenderId {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        let id = self.add(node);
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        id
    }

    fn add(&mut self, node: RenderNode) -> RenderId {
        let path = node.path.clone();
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        if let Some(path) = path {
            self.by_path.insert(path, id);
        }
        id
    }

    pub fn root(&self) -> Option<RenderId> {
        self.root
    }

    pub fn get(&self, id: RenderId) -> Option<&RenderNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: RenderId) -> Option<&mut RenderNode> {
        self.nodes.get_mut(id)
    }

    pub fn parent(&self, id: RenderId) -> Option<RenderId> {
        self.parent.get(id).copied()
    }

    /// Children of `id`; empty when it has none or does not exist.
    pub fn children(&self, id: RenderId) -> &[RenderId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(EMPTY_CHILDREN)
    }

    /// Nesting depth below the root (the root is 0).
    pub fn depth(&self, id: RenderId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(p) = self.parent(current) {
            depth += 1;
            current = p;
        }
        depth
    }

    /// The field or section node rendered for `path`.
    pub fn find(&self, path: &str) -> Option<RenderId> {
        self.by_path.get(path).copied()
    }

    pub fn node_at(&self, path: &str) -> Option<&RenderNode> {
        self.find(path).and_then(|id| self.get(id))
    }

    pub fn node_at_mut(&mut self, path: &str) -> Option<&mut RenderNode> {
        let id = self.find(path)?;
        self.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first traversal from the root.
    pub fn walk(&self) -> Vec<RenderId> {
        let mut result = Vec::new();
        let mut stack: Vec<RenderId> = self.root.into_iter().collect();
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Ids of every node with `role`, in pre-order.
    pub fn with_role(&self, role: RenderRole) -> Vec<RenderId> {
        self.walk()
            .into_iter()
            .filter(|&id| self.nodes[id].role == role)
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn field(path: &str) -> RenderNode {
        let mut node = RenderNode::new(RenderRole::Field);
        node.path = Some(path.to_owned());
        node
    }

    #[test]
    fn first_insert_is_root() {
        let mut tree = RenderTree::new();
        let root = tree.insert(RenderNode::new(RenderRole::Form));
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn walk_is_preorder() {
        let mut tree = RenderTree::new();
        let root = tree.insert(RenderNode::new(RenderRole::Form));
        let grid = tree.insert_child(root, RenderNode::new(RenderRole::Grid));
        let a = tree.insert_child(grid, field("a"));
        let b = tree.insert_child(grid, field("b"));
        let submit = tree.insert_child(root, RenderNode::new(RenderRole::Submit));

        assert_eq!(tree.walk(), vec![root, grid, a, b, submit]);
        assert_eq!(tree.with_role(RenderRole::Field), vec![a, b]);
        assert_eq!(tree.depth(b), 2);
        assert_eq!(tree.parent(a), Some(grid));
    }

    #[test]
    fn find_by_path() {
        let mut tree = RenderTree::new();
        let root = tree.insert(RenderNode::new(RenderRole::Form));
        let city = tree.insert_child(root, field("address.city"));
        assert_eq!(tree.find("address.city"), Some(city));
        assert!(tree.find("address").is_none());
        tree.node_at_mut("address.city").unwrap().label = Some("City".into());
        assert_eq!(tree.node_at("address.city").unwrap().label.as_deref(), Some("City"));
    }

    #[test]
    fn empty_tree() {
        let tree = RenderTree::new();
        assert!(tree.is_empty());
        assert!(tree.walk().is_empty());
    }
}
