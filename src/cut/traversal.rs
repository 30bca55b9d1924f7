//! Document-order traversal
//!
//! Document order is the depth-first pre-order sequence of a tree. [`step`] advances
//! one node at a time relative to a root, [`DocumentOrder`] turns that into an
//! iterator. Both rest on `next_move`, which the progressive cloner also drives so
//! the two walks cannot disagree.

use crate::cut::dom::TreeRead;
use std::iter::FusedIterator;

/// One document-order transition away from a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move<N> {
    /// The node has children: go to the first one
    Descend(N),
    /// Climb `ascend` levels, then go to `next`, the following child of `parent`
    Sibling { ascend: usize, parent: N, next: N },
    /// Nothing follows the node under the root
    Drained,
}

pub(crate) fn next_move<T>(tree: &T, root: T::Node, node: T::Node) -> Move<T::Node>
where
    T: TreeRead + ?Sized,
{
    if let Some(first) = tree.first_child(node) {
        return Move::Descend(first);
    }
    let mut current = node;
    let mut ascend = 0;
    while current != root {
        let Some(parent) = tree.parent(current) else {
            break;
        };
        let siblings = tree.children(parent);
        let following = siblings
            .iter()
            .position(|&child| child == current)
            .and_then(|index| siblings.get(index + 1));
        if let Some(&next) = following {
            return Move::Sibling {
                ascend,
                parent,
                next,
            };
        }
        current = parent;
        ascend += 1;
    }
    Move::Drained
}

/// The node after `node` in document order under `root`
///
/// Descends to the first child when there is one. Otherwise climbs until an ancestor
/// (or the node itself) has a next sibling, stopping at `root`. Returns `None` after
/// the last node under `root`.
pub fn step<T>(tree: &T, root: T::Node, node: T::Node) -> Option<T::Node>
where
    T: TreeRead + ?Sized,
{
    match next_move(tree, root, node) {
        Move::Descend(next) | Move::Sibling { next, .. } => Some(next),
        Move::Drained => None,
    }
}

/// Iterator over nodes in document order, applying [`step`] until it runs out
pub struct DocumentOrder<'a, T: TreeRead + ?Sized> {
    tree: &'a T,
    root: T::Node,
    next: Option<T::Node>,
}

impl<'a, T: TreeRead + ?Sized> DocumentOrder<'a, T> {
    /// Start at `start` (yielded first) and walk relative to `root`
    pub fn starting_at(tree: &'a T, root: T::Node, start: Option<T::Node>) -> Self {
        Self {
            tree,
            root,
            next: start,
        }
    }
}

impl<T: TreeRead + ?Sized> Iterator for DocumentOrder<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = step(self.tree, self.root, current);
        Some(current)
    }
}

impl<T: TreeRead + ?Sized> FusedIterator for DocumentOrder<'_, T> {}

/// Every node under `root` (excluding `root`) in document order
pub fn document_order<T>(tree: &T, root: T::Node) -> DocumentOrder<'_, T>
where
    T: TreeRead + ?Sized,
{
    DocumentOrder::starting_at(tree, root, tree.first_child(root))
}

/// Concatenated text of `node` and its descendants in document order
pub fn text_content<T>(tree: &T, node: T::Node) -> String
where
    T: TreeRead + ?Sized,
{
    let mut out = String::new();
    if let Some(value) = tree.text_value(node) {
        out.push_str(value);
    }
    for descendant in document_order(tree, node) {
        if let Some(value) = tree.text_value(descendant) {
            out.push_str(value);
        }
    }
    out
}
