//! Node handles and owned node payloads
//!
//! Uses NodeId (u32) for compact, copyable node references into a [`Document`] arena.
//!
//! [`Document`]: super::Document

use super::traits::NodeData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact node identifier (index into a document arena)
///
/// Ids are plain data: they can be stored inside a cursor and serialized, but
/// they only mean something to the document that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Position of this node in its document's arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single element attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Owned payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with a tag name and ordered attributes
    Element {
        tag: String,
        attributes: Vec<Attribute>,
    },
    /// Text content, never has children
    Text(String),
}

impl NodeKind {
    /// Borrow this payload as a [`NodeData`] view
    pub fn as_data(&self) -> NodeData<'_> {
        match self {
            NodeKind::Element { tag, attributes } => NodeData::Element { tag, attributes },
            NodeKind::Text(value) => NodeData::Text(value),
        }
    }

    /// Shallow owned copy of a borrowed view
    pub fn from_data(data: NodeData<'_>) -> Self {
        match data {
            NodeData::Element { tag, attributes } => NodeKind::Element {
                tag: tag.to_string(),
                attributes: attributes.to_vec(),
            },
            NodeData::Text(value) => NodeKind::Text(value.to_string()),
        }
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match self {
            NodeKind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|attr| attr.name == name) {
                    Some(existing) => existing.value = value.to_string(),
                    None => attributes.push(Attribute::new(name, value)),
                }
                true
            }
            NodeKind::Text(_) => false,
        }
    }
}
