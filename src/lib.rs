//! # treecut
//!
//! Positional addressing and cutting of ordered document trees.
//!
//! - [address](cut::address): 1-based positional addresses, document-order comparison,
//!   address to node and back
//! - [traversal](cut::traversal): single-step document-order advance
//! - [extract](cut::extract): a standalone copy of an address range, ordered-list
//!   numbering carried across the cut
//! - [progressive](cut::progressive): pausable, resumable copying driven by a predicate
//! - [paging](cut::paging): splitting a tree into budgeted pages on top of it
//!
//! The algorithms work on any tree implementing [`TreeRead`](cut::TreeRead) /
//! [`TreeWrite`](cut::TreeWrite); [`Document`](cut::Document) is the arena tree
//! shipped with the crate.
//!
//! ## Testing
//!
//! Structural checks go through the fluent assertions in [testing](cut::testing) or
//! through [`TreeSnapshot`](cut::TreeSnapshot) equality, never through hand walks.

pub mod cut;
