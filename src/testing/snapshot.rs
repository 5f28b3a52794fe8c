//! Text rendering of render trees for snapshot testing.
//!
//! [`render_to_string`] turns a [`RenderTree`] into an indented outline, one
//! node per line. [`TextRenderer`] is a [`Renderer`] that keeps the latest
//! outline and a set of known mount targets.

use std::fmt::Write as _;

use crate::error::FormError;
use crate::render::{RenderNode, RenderRole, RenderTree, Renderer};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render `tree` as an indented outline.
///
/// Two spaces of indent per level. Lines are separated by `'\n'`; the final
/// line has no trailing newline.
///
/// # Examples
///
/// ```
/// use clarify::descriptor::{FieldDescriptor, FieldKind, Structure};
/// use clarify::render::{build, ComponentRegistry, LayoutConfig};
/// use clarify::testing::render_to_string;
///
/// let structure = Structure::new()
///     .with_field("name", FieldDescriptor::new(FieldKind::Text).with_label("Name"));
/// let tree = build(&structure, &LayoutConfig::default(), &ComponentRegistry::new());
/// assert!(render_to_string(&tree).contains("[text] name: Name span=3"));
/// ```
pub fn render_to_string(tree: &RenderTree) -> String {
    let lines: Vec<String> = tree
        .walk()
        .into_iter()
        .filter_map(|id| tree.get(id).map(|node| (tree.depth(id), node)))
        .map(|(depth, node)| format!("{}{}", "  ".repeat(depth), describe(node)))
        .collect();
    lines.join("\n")
}

fn describe(node: &RenderNode) -> String {
    let path = node.path.as_deref().unwrap_or_default();
    let mut line = match node.role {
        RenderRole::Form => "form".to_owned(),
        RenderRole::Grid => "grid".to_owned(),
        RenderRole::Submit => format!("submit: {}", node.label.as_deref().unwrap_or_default()),
        RenderRole::Section => format!(
            "[{}] {} span={}",
            node.component,
            node.label.as_deref().unwrap_or(path),
            node.span
        ),
        RenderRole::Field => {
            let mut line = format!("[{}] {path}", node.component);
            if let Some(label) = &node.label {
                let _ = write!(line, ": {label}");
            }
            if node.required {
                line.push('*');
            }
            let _ = write!(line, " span={}", node.span);
            if let Some(value) = &node.value {
                let _ = write!(line, " = {value}");
            }
            line
        }
    };
    if node.disabled {
        line.push_str(" (disabled)");
    }
    if node.hidden {
        line.push_str(" (hidden)");
    }
    if let Some(errors) = node.error_text() {
        let _ = write!(line, " ! {errors}");
    }
    line
}

// ---------------------------------------------------------------------------
// TextRenderer
// ---------------------------------------------------------------------------

/// A headless renderer producing outlines.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    targets: Vec<String>,
    mounted: Option<String>,
    output: String,
    refreshes: usize,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an existing mount target (builder).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// The latest outline.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Target the tree is mounted on, if any.
    pub fn mounted_at(&self) -> Option<&str> {
        self.mounted.as_deref()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}

impl Renderer for TextRenderer {
    fn mount(&mut self, tree: &RenderTree, target: &str) -> Result<(), FormError> {
        if !self.targets.iter().any(|t| t == target) {
            return Err(FormError::MountTargetNotFound(target.to_owned()));
        }
        self.mounted = Some(target.to_owned());
        self.output = render_to_string(tree);
        Ok(())
    }

    fn refresh(&mut self, tree: &RenderTree) {
        self.refreshes += 1;
        self.output = render_to_string(tree);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
