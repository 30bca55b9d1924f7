//! Tree provider traits - the capabilities the cutting algorithms need
//!
//! Address arithmetic, traversal, extraction and progressive cloning are written
//! against these two traits rather than a concrete node type, so any host tree that
//! can answer "who is my parent" and "what are my children" can be sliced.
//!
//! - [`TreeRead`]: ordered child access, parent back-references, node payloads
//! - [`TreeWrite`]: node creation, appending, detaching, attribute writes
//!
//! Nodes are referenced through a `Copy` handle (`TreeRead::Node`). Handles are only
//! meaningful to the tree that produced them.

use super::node::Attribute;
use std::fmt;

/// Borrowed view of a node's own payload (no children)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeData<'a> {
    Element {
        tag: &'a str,
        attributes: &'a [Attribute],
    },
    Text(&'a str),
}

/// Read access to an ordered tree
pub trait TreeRead {
    type Node: Copy + Eq + fmt::Debug;

    /// Parent of `node`, `None` for a detached or top-level node
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children of `node` in document order
    fn children(&self, node: Self::Node) -> &[Self::Node];

    /// The node's own payload
    fn data(&self, node: Self::Node) -> NodeData<'_>;

    fn child_count(&self, node: Self::Node) -> usize {
        self.children(node).len()
    }

    /// Child at a 0-based index
    fn child_at(&self, node: Self::Node, index: usize) -> Option<Self::Node> {
        self.children(node).get(index).copied()
    }

    fn first_child(&self, node: Self::Node) -> Option<Self::Node> {
        self.children(node).first().copied()
    }

    fn last_child(&self, node: Self::Node) -> Option<Self::Node> {
        self.children(node).last().copied()
    }

    /// 0-based index of `node` among its siblings
    fn position(&self, node: Self::Node) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&child| child == node)
    }

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&child| child == node)?;
        siblings.get(index + 1).copied()
    }

    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&child| child == node)?;
        index.checked_sub(1).map(|previous| siblings[previous])
    }

    fn is_element(&self, node: Self::Node) -> bool {
        matches!(self.data(node), NodeData::Element { .. })
    }

    fn is_text(&self, node: Self::Node) -> bool {
        matches!(self.data(node), NodeData::Text(_))
    }

    fn tag_name(&self, node: Self::Node) -> Option<&str> {
        match self.data(node) {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str> {
        match self.data(node) {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// Character data of a text node, `None` for elements
    fn text_value(&self, node: Self::Node) -> Option<&str> {
        match self.data(node) {
            NodeData::Text(value) => Some(value),
            NodeData::Element { .. } => None,
        }
    }
}

/// Mutation capabilities on top of [`TreeRead`]
pub trait TreeWrite: TreeRead {
    /// Create a detached, childless node from a payload view
    fn create(&mut self, data: NodeData<'_>) -> Self::Node;

    /// Append `child` as the last child of `parent`, detaching it first if needed
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Remove `node` from its parent's children. No-op for a detached node.
    fn detach(&mut self, node: Self::Node);

    /// Set (or replace) an attribute. No-op on text nodes.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Shallow clone of a node from any tree, without children
    fn copy_shallow_from<S>(&mut self, source: &S, node: S::Node) -> Self::Node
    where
        S: TreeRead + ?Sized,
    {
        self.create(source.data(node))
    }

    /// Deep clone of a subtree from any tree. The copy is detached.
    fn copy_subtree_from<S>(&mut self, source: &S, node: S::Node) -> Self::Node
    where
        S: TreeRead + ?Sized,
    {
        let root = self.copy_shallow_from(source, node);
        let mut pending = vec![(node, root)];
        while let Some((original, copy)) = pending.pop() {
            for &child in source.children(original) {
                let child_copy = self.copy_shallow_from(source, child);
                self.append_child(copy, child_copy);
                pending.push((child, child_copy));
            }
        }
        root
    }
}
