//! Host tree - the ordered document tree the cutting algorithms operate on
//!
//!     The algorithms in this crate only need a narrow set of capabilities from a tree:
//!     ordered child access, a parent back-reference, node payloads (element tag and
//!     attributes, or text), shallow node creation, appending and detaching. Those are
//!     expressed by [`TreeRead`] and [`TreeWrite`], so any host tree can be sliced.
//!
//!     [`Document`] is the arena implementation shipped with the crate. Parents own their
//!     children through ordered id lists, children point back at their parent by id.
//!
//! Roots
//!
//!     "Root" is not a property of a node. Every operation takes the root it should work
//!     relative to, and the same node may be the root of one call and a descendant in the
//!     next.

pub mod document;
pub mod node;
pub mod traits;

pub use document::Document;
pub use node::{Attribute, NodeId, NodeKind};
pub use traits::{NodeData, TreeRead, TreeWrite};

use crate::cut::snapshot::{self, TreeSnapshot};

/// A standalone tree produced by an operation, together with its root
#[derive(Debug, Clone)]
pub struct Fragment<T: TreeRead> {
    pub tree: T,
    pub root: T::Node,
}

impl<T: TreeRead> Fragment<T> {
    pub fn new(tree: T, root: T::Node) -> Self {
        Self { tree, root }
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        snapshot::snapshot(&self.tree, self.root)
    }
}
