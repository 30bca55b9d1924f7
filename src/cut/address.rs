//! Address algebra - positional paths into a tree
//!
//! An address is an ordered sequence of 1-based sibling positions read root-to-leaf:
//! `/2/1` is "the first child of the second child of the root". The empty address is
//! the root itself.
//!
//! ## Key Design
//!
//! - **Snapshot-relative**: addresses are recomputed from the current tree shape and
//!   are only meaningful for the (root, tree state) pair that produced them. Mutating
//!   the tree invalidates them. Nothing here caches addresses.
//! - **Document order**: comparing two addresses compares the document order of the
//!   nodes they locate. An ancestor's address always sorts before its descendants'.
//! - **Sentinels, not errors**: out-of-range selectors, absent nodes and invalid
//!   sequences yield `None`.
//!
//! ## Types and functions
//!
//! - [`Address`] - validated, serializable address (every position is positive)
//! - [`compare`] - document-order comparison of raw position sequences
//! - [`resolve`] / [`address_of`] - address to node, and back
//! - [`first_address`] / [`last_address`] - range endpoints for a root

use crate::cut::dom::TreeRead;
use crate::cut::error::AddressParseError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// A positional path relative to some root
///
/// Ordering is document order: lexicographic by position, with a strict prefix
/// (an ancestor) sorting first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(Vec<u32>);

impl Address {
    /// The empty address, locating the root itself
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build from positions already known to be 1-based
    pub(crate) fn from_positions(positions: Vec<u32>) -> Self {
        debug_assert!(is_valid(&positions));
        Self(positions)
    }

    pub fn positions(&self) -> &[u32] {
        &self.0
    }

    pub fn into_positions(self) -> Vec<u32> {
        self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of levels below the root
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Address of the child at a 1-based `position` under this address
    pub fn child(&self, position: u32) -> Option<Address> {
        (position > 0).then(|| {
            let mut positions = self.0.clone();
            positions.push(position);
            Address(positions)
        })
    }

    /// Address of the parent, `None` for the root
    pub fn parent(&self) -> Option<Address> {
        let (_, parent) = self.0.split_last()?;
        Some(Address(parent.to_vec()))
    }

    /// True when `other` locates a strict descendant of this address
    pub fn is_ancestor_of(&self, other: &Address) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }

    /// Move to the first child: push a new position 1
    pub(crate) fn descend(&mut self) {
        self.0.push(1);
    }

    /// Move up one level
    pub(crate) fn ascend(&mut self) {
        self.0.pop();
    }

    /// Move to the next sibling: increment the last position
    pub(crate) fn advance(&mut self) {
        if let Some(last) = self.0.last_mut() {
            *last = last.saturating_add(1);
        }
    }
}

impl Deref for Address {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl AsRef<[u32]> for Address {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for position in &self.0 {
            write!(f, "/{}", position)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<u32>> for Address {
    type Error = AddressParseError;

    fn try_from(positions: Vec<u32>) -> Result<Self, Self::Error> {
        match positions.iter().position(|&p| p == 0) {
            Some(index) => Err(AddressParseError::ZeroPosition { index }),
            None => Ok(Address(positions)),
        }
    }
}

impl TryFrom<&[u32]> for Address {
    type Error = AddressParseError;

    fn try_from(positions: &[u32]) -> Result<Self, Self::Error> {
        Address::try_from(positions.to_vec())
    }
}

impl<const N: usize> TryFrom<[u32; N]> for Address {
    type Error = AddressParseError;

    fn try_from(positions: [u32; N]) -> Result<Self, Self::Error> {
        Address::try_from(positions.to_vec())
    }
}

/// Parses `/2/1`, `2/1`, `/` or the empty string (root)
impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if body.is_empty() {
            return Ok(Address::root());
        }
        let positions = body
            .split('/')
            .map(|segment| {
                segment
                    .parse::<u32>()
                    .map_err(|_| AddressParseError::InvalidSegment(segment.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Address::try_from(positions)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let positions = Vec::<u32>::deserialize(deserializer)?;
        Address::try_from(positions).map_err(serde::de::Error::custom)
    }
}

fn is_valid(positions: &[u32]) -> bool {
    positions.iter().all(|&p| p > 0)
}

/// Compare two position sequences in document order
///
/// Position by position, the smaller integer wins at the first difference. If one
/// sequence is a strict prefix of the other, the prefix (the ancestor) is less. Two
/// exhausted sequences are equal. Returns `None` (incomparable) when either sequence
/// is not a valid address, i.e. holds a 0 position.
pub fn compare(a: &[u32], b: &[u32]) -> Option<Ordering> {
    if !is_valid(a) || !is_valid(b) {
        return None;
    }
    let mut index = 0;
    loop {
        match (a.get(index), b.get(index)) {
            (Some(x), Some(y)) if x == y => index += 1,
            (Some(x), Some(y)) => return Some(x.cmp(y)),
            (None, None) => return Some(Ordering::Equal),
            (None, Some(_)) => return Some(Ordering::Less),
            (Some(_), None) => return Some(Ordering::Greater),
        }
    }
}

/// [`compare`] for operands that may be absent; an absent operand is incomparable
pub fn compare_optional(a: Option<&[u32]>, b: Option<&[u32]>) -> Option<Ordering> {
    compare(a?, b?)
}

/// Resolve an address against `root`
///
/// Each position selects the child at `position - 1`. An out-of-range selector yields
/// `None`, and `None` propagates through any remaining selectors.
pub fn resolve<T>(tree: &T, root: T::Node, address: &[u32]) -> Option<T::Node>
where
    T: TreeRead + ?Sized,
{
    address.iter().try_fold(root, |node, &position| {
        let index = usize::try_from(position).ok()?.checked_sub(1)?;
        tree.child_at(node, index)
    })
}

/// Address of `node` relative to `root`, the inverse of [`resolve`]
///
/// - absent node: `None`
/// - `node == root`: the empty address
/// - a node whose ancestry never reaches `root`: `None` once the ascent hits a
///   parentless node
pub fn address_of<T>(tree: &T, root: T::Node, node: impl Into<Option<T::Node>>) -> Option<Address>
where
    T: TreeRead + ?Sized,
{
    let mut current = node.into()?;
    let mut positions = Vec::new();
    while current != root {
        let parent = tree.parent(current)?;
        let index = tree
            .children(parent)
            .iter()
            .position(|&child| child == current)?;
        positions.push(index as u32 + 1);
        current = parent;
    }
    positions.reverse();
    Some(Address(positions))
}

/// Address of the first node after `root` in document order (its first child)
pub fn first_address<T>(tree: &T, root: T::Node) -> Option<Address>
where
    T: TreeRead + ?Sized,
{
    address_of(tree, root, tree.first_child(root))
}

/// Address of the last node under `root` in document order
///
/// Follows last children down until a childless node is reached.
pub fn last_address<T>(tree: &T, root: T::Node) -> Option<Address>
where
    T: TreeRead + ?Sized,
{
    let mut node = tree.last_child(root)?;
    while let Some(last) = tree.last_child(node) {
        node = last;
    }
    address_of(tree, root, node)
}
