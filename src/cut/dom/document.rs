//! Document - Arena-based ordered tree
//!
//! Efficient tree storage with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - Parent back-references as ids, children as ordered id lists
//!
//! A document is a forest: nodes are created detached and become part of a tree once
//! appended under another node. Detaching a node leaves it (and its subtree) in the
//! arena, unreachable from its former parent.

use super::node::{Attribute, NodeId, NodeKind};
use super::traits::{NodeData, TreeRead, TreeWrite};
use crate::cut::snapshot::{self, TreeSnapshot};
use crate::cut::traversal;

#[derive(Debug, Clone)]
struct Entry {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An ordered tree stored in arena format
///
/// All methods taking a [`NodeId`] panic if the id was not produced by this document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Entry>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element
    pub fn element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.into(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached element with attributes
    pub fn element_with<I, K, V>(&mut self, tag: impl Into<String>, attributes: I) -> NodeId
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push(NodeKind::Element {
            tag: tag.into(),
            attributes: attributes
                .into_iter()
                .map(|(name, value)| Attribute::new(name, value))
                .collect(),
        })
    }

    /// Create a detached text node
    pub fn text(&mut self, value: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(value.into()))
    }

    /// Append `child` under `parent` and return `child`
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        self.append_child(parent, child);
        child
    }

    /// Materialize a snapshot as a new detached subtree
    pub fn insert(&mut self, snapshot: &TreeSnapshot) -> NodeId {
        snapshot::materialize(self, snapshot)
    }

    /// Capture the subtree under `node`
    pub fn snapshot(&self, node: NodeId) -> TreeSnapshot {
        snapshot::snapshot(self, node)
    }

    /// Concatenated text of the subtree under `node`, in document order
    pub fn text_content(&self, node: NodeId) -> String {
        traversal::text_content(self, node)
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.entry(node).kind
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Entry {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    #[inline]
    fn entry(&self, node: NodeId) -> &Entry {
        &self.nodes[node.index()]
    }

    #[inline]
    fn entry_mut(&mut self, node: NodeId) -> &mut Entry {
        &mut self.nodes[node.index()]
    }
}

impl TreeRead for Document {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.entry(node).parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.entry(node).children
    }

    fn data(&self, node: NodeId) -> NodeData<'_> {
        self.entry(node).kind.as_data()
    }
}

impl TreeWrite for Document {
    fn create(&mut self, data: NodeData<'_>) -> NodeId {
        self.push(NodeKind::from_data(data))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.entry_mut(child).parent = Some(parent);
        self.entry_mut(parent).children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.entry_mut(node).parent.take() {
            self.entry_mut(parent).children.retain(|&child| child != node);
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.entry_mut(node).kind.set_attribute(name, value);
    }
}
