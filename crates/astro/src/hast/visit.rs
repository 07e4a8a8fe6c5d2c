//! Preorder tree walk with in-place mutation.

use super::Node;

/// What the walk does after a visitor returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitAction {
    /// Descend into the node's children, then carry on.
    Continue,
    /// Do not descend into this node's children.
    Skip,
    /// Stop the whole walk.
    Exit,
}

/// Visits `node` and every descendant once, parents before children, siblings
/// in order.
///
/// The visitor may mutate the node it is given, including its children; the
/// walk then descends into the mutated child list. Returns `false` if the
/// visitor requested [`VisitAction::Exit`].
pub fn visit_mut<F>(node: &mut Node, visitor: &mut F) -> bool
where
    F: FnMut(&mut Node) -> VisitAction,
{
    match visitor(node) {
        VisitAction::Exit => return false,
        VisitAction::Skip => return true,
        VisitAction::Continue => {}
    }

    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            if !visit_mut(child, visitor) {
                return false;
            }
        }
    }
    true
}
