//! Range extraction
//!
//! [`extract`] produces a standalone tree holding the document-order slice `[from, to)`
//! (or `[from, to]` when inclusive) of a root's subtree. Ancestors of kept nodes are
//! kept as structural context, so the result is always a well-formed tree rooted at a
//! copy of the original root.
//!
//! The source tree is never touched: the whole subtree is copied first and all
//! pruning happens on the copy.
//!
//! Pruning
//!
//!     - before `from`: the preceding siblings of `from` and of each of its ancestors
//!       below the root are removed.
//!     - from `to`: the children of `to` and the following siblings of `to` and of each
//!       of its ancestors are removed. When exclusive, `to` itself goes too, and so does
//!       its parent if that leaves it empty (never the root).
//!
//! Ordered lists
//!
//!     A fragment starting inside an ordered list would restart numbering at 1. Before
//!     pruning, every list item on the path from `from` up to the root that sits in an
//!     ordered list sets its list's start attribute to the item's 1-based ordinal. Any
//!     start the list already carried is overwritten.

use crate::cut::address::{compare, resolve, Address};
use crate::cut::config::ListConfig;
use crate::cut::dom::{Document, Fragment, TreeRead, TreeWrite};
use crate::cut::error::{Bound, CutError};
use std::cmp::Ordering;
use tracing::debug;

/// Range and behavior of an extraction
///
/// Absent bounds default to the first and one-past-the-last positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub from: Option<Address>,
    pub to: Option<Address>,
    /// Keep the `to` node itself (emptied of descendants)
    pub inclusive: bool,
    pub lists: ListConfig,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_address(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_address(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    pub fn with_lists(mut self, lists: ListConfig) -> Self {
        self.lists = lists;
        self
    }

    /// Both bounds are explicitly the root: the empty range over the root itself
    fn is_root_only(&self) -> bool {
        matches!((&self.from, &self.to), (Some(from), Some(to)) if from.is_root() && to.is_root())
    }
}

/// Extract a range of `root`'s subtree into a new [`Document`]
pub fn extract<S>(tree: &S, root: S::Node, options: &ExtractOptions) -> Result<Fragment<Document>, CutError>
where
    S: TreeRead + ?Sized,
{
    extract_into(tree, root, options)
}

/// Extract a range of `root`'s subtree into a new tree of any writable type
///
/// # Errors
///
/// - [`CutError::UnresolvedBound`] when `from` or `to` locates no node under `root`
/// - [`CutError::InvertedRange`] when `from` comes after a non-root `to` in document order
pub fn extract_into<S, T>(tree: &S, root: S::Node, options: &ExtractOptions) -> Result<Fragment<T>, CutError>
where
    S: TreeRead + ?Sized,
    T: TreeWrite + Default,
{
    if options.is_root_only() {
        let mut target = T::default();
        let copy = target.copy_shallow_from(tree, root);
        return Ok(Fragment::new(target, copy));
    }

    // A root `to` bounds nothing, so it cannot invert the range
    if let (Some(from), Some(to)) = (&options.from, &options.to) {
        if !to.is_root() && compare(from, to) == Some(Ordering::Greater) {
            return Err(CutError::InvertedRange {
                from: from.clone(),
                to: to.clone(),
            });
        }
    }

    let mut scratch = T::default();
    let scratch_root = scratch.copy_subtree_from(tree, root);
    let from_node = resolve_bound(&scratch, scratch_root, options.from.as_ref(), Bound::From)?;
    let to_node = resolve_bound(&scratch, scratch_root, options.to.as_ref(), Bound::To)?;

    debug!(
        from = ?options.from.as_ref().map(ToString::to_string),
        to = ?options.to.as_ref().map(ToString::to_string),
        inclusive = options.inclusive,
        "extracting range"
    );

    if let Some(node) = from_node {
        prune_before(&mut scratch, scratch_root, node, &options.lists);
    }
    if let Some(node) = to_node {
        prune_from(&mut scratch, scratch_root, node, options.inclusive);
    }

    // Re-copy so the result holds no detached leftovers from pruning
    let mut target = T::default();
    let copy = target.copy_subtree_from(&scratch, scratch_root);
    Ok(Fragment::new(target, copy))
}

fn resolve_bound<T>(
    tree: &T,
    root: T::Node,
    address: Option<&Address>,
    bound: Bound,
) -> Result<Option<T::Node>, CutError>
where
    T: TreeRead + ?Sized,
{
    let Some(address) = address else {
        return Ok(None);
    };
    resolve(tree, root, address)
        .map(Some)
        .ok_or_else(|| CutError::UnresolvedBound {
            bound,
            address: address.clone(),
        })
}

/// Remove everything before `node` in document order, ancestors excepted
fn prune_before<T>(tree: &mut T, root: T::Node, node: T::Node, lists: &ListConfig)
where
    T: TreeWrite + ?Sized,
{
    if node == root {
        return;
    }
    preserve_list_numbering(tree, root, node, lists);

    let mut current = node;
    while current != root {
        while let Some(previous) = tree.previous_sibling(current) {
            tree.detach(previous);
        }
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
}

/// Remove everything from `node` onward in document order
fn prune_from<T>(tree: &mut T, root: T::Node, node: T::Node, inclusive: bool)
where
    T: TreeWrite + ?Sized,
{
    if node == root {
        return;
    }
    while let Some(child) = tree.first_child(node) {
        tree.detach(child);
    }

    let mut current = node;
    while current != root {
        while let Some(next) = tree.next_sibling(current) {
            tree.detach(next);
        }
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    if !inclusive {
        if let Some(parent) = tree.parent(node) {
            tree.detach(node);
            if parent != root && tree.child_count(parent) == 0 {
                tree.detach(parent);
            }
        }
    }
}

/// Carry list numbering across the cut at `node`
fn preserve_list_numbering<T>(tree: &mut T, root: T::Node, node: T::Node, lists: &ListConfig)
where
    T: TreeWrite + ?Sized,
{
    let mut current = node;
    while current != root {
        let Some(parent) = tree.parent(current) else {
            break;
        };
        if let Some(ordinal) = list_item_ordinal(tree, parent, current, lists) {
            debug!(ordinal, "continuing ordered list numbering");
            tree.set_attribute(parent, &lists.start_attribute, &ordinal.to_string());
        }
        current = parent;
    }
}

/// 1-based position of `item` among the element children of `list`, when `item` is a
/// list item of an ordered list
fn list_item_ordinal<T>(tree: &T, list: T::Node, item: T::Node, lists: &ListConfig) -> Option<i64>
where
    T: TreeRead + ?Sized,
{
    let is_entry = tree.tag_name(item).is_some_and(|tag| lists.is_item(tag))
        && tree.tag_name(list).is_some_and(|tag| lists.is_list(tag));
    if !is_entry {
        return None;
    }
    let index = tree
        .children(list)
        .iter()
        .filter(|&&child| tree.is_element(child))
        .position(|&child| child == item)?;
    i64::try_from(index + 1).ok()
}
