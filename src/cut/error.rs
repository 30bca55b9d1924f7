//! Error types for cutting operations
//!
//! Conditions reachable through normal use (out-of-range address, absent node,
//! incomparable addresses) are reported with `Option` sentinels by the operations
//! themselves. The errors here are caller-contract violations that would otherwise
//! produce a structurally wrong result.

use crate::cut::address::Address;
use std::fmt;
use thiserror::Error;

/// Which end of an extraction range an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    From,
    To,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::From => write!(f, "from"),
            Bound::To => write!(f, "to"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CutError {
    #[error("{bound} address {address} does not resolve to a node")]
    UnresolvedBound { bound: Bound, address: Address },

    #[error("range is inverted: from {from} comes after to {to}")]
    InvertedRange { from: Address, to: Address },

    #[error("cannot resume progressive cloning at the source root")]
    ResumeAtRoot,

    #[error("resume node is not a descendant of the source root")]
    NotADescendant,

    #[error(
        "baseline address {address} has {len} positions but the resume node is {depth} levels deep"
    )]
    BaselineTooShort {
        address: Address,
        depth: usize,
        len: usize,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Errors raised when reading an address from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// Segment is not an unsigned integer
    #[error("Invalid address segment: {0:?}")]
    InvalidSegment(String),
    /// Positions are 1-based
    #[error("Address positions are 1-based, found 0 at segment {index}")]
    ZeroPosition { index: usize },
}
