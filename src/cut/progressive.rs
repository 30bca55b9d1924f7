//! Progressive cloning - resumable, pausable depth-first copy
//!
//! [`clone_progressive`] copies a root's subtree into a target tree one node at a time
//! in document order, starting anywhere under the root, and pauses as soon as a caller
//! predicate says so. The returned [`Cursor`] is plain data: it can be stored,
//! serialized, or dropped, and it is all that is needed to continue later.
//!
//! ## Starting mid-tree
//!
//! Before copying, empty shells of every ancestor of the start node (below the source
//! root) are rebuilt under the target root, so the copied nodes keep their nesting
//! context (a list item still lands inside a list).
//!
//! ## Address baseline
//!
//! The address carried by the cursor starts from the one the caller supplies, which
//! need not be the start node's real address. Descending pushes 1, moving to a sibling
//! increments the last position and climbing pops, so a shifted baseline stays
//! shifted consistently. This lets several passes share one address space.
//!
//! ## Pausing
//!
//! The predicate runs after a node is copied. The paused node is therefore already in
//! the target. [`Cursor::resume_here`] resumes by copying it again (the paused node
//! opens the next pass), [`Cursor::successor`] resumes after it.

use crate::cut::address::Address;
use crate::cut::dom::{TreeRead, TreeWrite};
use crate::cut::error::CutError;
use crate::cut::traversal::{next_move, Move};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Where a progressive pass starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFrom<N> {
    pub node: N,
    /// Caller-chosen address of `node`, possibly shifted
    pub address: Address,
}

impl<N> ResumeFrom<N> {
    pub fn new(node: N, address: Address) -> Self {
        Self { node, address }
    }
}

/// A paused traversal position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor<N> {
    /// The last node copied
    pub node: N,
    /// Source parent of `node`
    pub parent: N,
    pub address: Address,
}

impl<N: Copy + Eq + fmt::Debug> Cursor<N> {
    /// Resume by copying the paused node again
    pub fn resume_here(&self) -> ResumeFrom<N> {
        ResumeFrom::new(self.node, self.address.clone())
    }

    /// Resume at the node after the paused one, `None` when nothing follows it
    pub fn successor<S>(&self, source: &S, source_root: N) -> Option<ResumeFrom<N>>
    where
        S: TreeRead<Node = N> + ?Sized,
    {
        let mut next = self.clone();
        next.follow(next_move(source, source_root, self.node))
            .then(|| ResumeFrom::new(next.node, next.address))
    }

    /// Apply one document-order transition, keeping the address in step
    fn follow(&mut self, step: Move<N>) -> bool {
        match step {
            Move::Descend(child) => {
                self.parent = self.node;
                self.node = child;
                self.address.descend();
                true
            }
            Move::Sibling {
                ascend,
                parent,
                next,
            } => {
                for _ in 0..ascend {
                    self.address.ascend();
                }
                self.address.advance();
                self.parent = parent;
                self.node = next;
                true
            }
            Move::Drained => false,
        }
    }
}

/// Copy `source_root`'s subtree into `target_root`, starting at `resume_from`
///
/// Each node is shallow-copied under the current target parent, then `should_stop`
/// sees the cursor for that node. Returns the cursor of the node the pass paused on,
/// or `None` once everything after the start node has been copied.
///
/// # Errors
///
/// - [`CutError::ResumeAtRoot`] when the start node is `source_root`
/// - [`CutError::NotADescendant`] when the start node is not under `source_root`
/// - [`CutError::BaselineTooShort`] when the supplied address has fewer positions than
///   the start node is deep, so climbing would run out of positions
pub fn clone_progressive<S, T, F>(
    source: &S,
    source_root: S::Node,
    target: &mut T,
    target_root: T::Node,
    mut should_stop: F,
    resume_from: ResumeFrom<S::Node>,
) -> Result<Option<Cursor<S::Node>>, CutError>
where
    S: TreeRead + ?Sized,
    T: TreeWrite + ?Sized,
    F: FnMut(&Cursor<S::Node>) -> bool,
{
    let ResumeFrom { node, address } = resume_from;
    if node == source_root {
        return Err(CutError::ResumeAtRoot);
    }

    // Ancestors strictly between the root and the start node, nearest first
    let mut ancestors = Vec::new();
    let mut parent = source.parent(node).ok_or(CutError::NotADescendant)?;
    let start_parent = parent;
    while parent != source_root {
        ancestors.push(parent);
        parent = source.parent(parent).ok_or(CutError::NotADescendant)?;
    }

    let depth = ancestors.len() + 1;
    let len = address.len();
    if len < depth {
        return Err(CutError::BaselineTooShort {
            address,
            depth,
            len,
        });
    }

    debug!(address = %address, depth, "starting progressive pass");

    // Target copies of the open ancestors; the target root sits below them all
    let mut parents = Vec::with_capacity(ancestors.len());
    for &ancestor in ancestors.iter().rev() {
        let shell = target.copy_shallow_from(source, ancestor);
        let outer = parents.last().copied().unwrap_or(target_root);
        target.append_child(outer, shell);
        parents.push(shell);
    }

    let mut cursor = Cursor {
        node,
        parent: start_parent,
        address,
    };
    loop {
        let copy = target.copy_shallow_from(source, cursor.node);
        let outer = parents.last().copied().unwrap_or(target_root);
        target.append_child(outer, copy);
        trace!(address = %cursor.address, "copied node");

        if should_stop(&cursor) {
            debug!(address = %cursor.address, "progressive pass paused");
            return Ok(Some(cursor));
        }

        let step = next_move(source, source_root, cursor.node);
        match step {
            Move::Descend(_) => parents.push(copy),
            Move::Sibling { ascend, .. } => parents.truncate(parents.len().saturating_sub(ascend)),
            Move::Drained => {
                debug!("progressive pass drained");
                return Ok(None);
            }
        }
        cursor.follow(step);
    }
}
