//! The seam between a form and whatever draws it.

use super::tree::RenderTree;
use crate::error::FormError;

/// An external renderer consuming render-instruction trees.
///
/// Renderers own every visual concern. They report user interaction back
/// through [`FormEvent`](crate::event::FormEvent)s.
pub trait Renderer {
    /// Attach `tree` to the mount target named `target`.
    ///
    /// Returns [`FormError::MountTargetNotFound`] when the target does not
    /// exist.
    fn mount(&mut self, tree: &RenderTree, target: &str) -> Result<(), FormError>;

    /// Redraw after the tree's values or errors changed.
    fn refresh(&mut self, tree: &RenderTree);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn mount(&mut self, tree: &RenderTree, target: &str) -> Result<(), FormError> {
        (**self).mount(tree, target)
    }

    fn refresh(&mut self, tree: &RenderTree) {
        (**self).refresh(tree);
    }
}
