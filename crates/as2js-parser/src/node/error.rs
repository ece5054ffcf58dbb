//! Contract violations raised by the node model.
//!
//! These are programming errors in whoever drives the tree, never problems
//! in the source being parsed. The parser turns them into fatal
//! diagnostics.

use thiserror::Error;

use super::{Attribute, Flag, Link, NodeId, NodeType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node handle {0} does not refer to a live node")]
    StaleHandle(NodeId),

    #[error("{node_type} node is locked and cannot be modified")]
    Locked { node_type: NodeType },

    #[error("{node_type} node is not locked")]
    NotLocked { node_type: NodeType },

    #[error("{node_type} nodes cannot have children")]
    InvalidParent { node_type: NodeType },

    #[error("{node_type} nodes cannot be children")]
    InvalidChild { node_type: NodeType },

    #[error("a {node_type} node cannot become a descendant of itself")]
    Cycle { node_type: NodeType },

    #[error("{node_type} node has no parent")]
    NoParent { node_type: NodeType },

    #[error("{node_type} node is still attached to a parent")]
    StillAttached { node_type: NodeType },

    #[error("child index {index} is out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("flag {flag:?} is not valid on {node_type} nodes")]
    FlagNotAllowed { flag: Flag, node_type: NodeType },

    #[error("attribute '{}' is not valid on {node_type} nodes", .attribute.name())]
    AttributeNotAllowed { attribute: Attribute, node_type: NodeType },

    #[error("{node_type} nodes do not carry a {expected} value")]
    ValueNotAllowed { node_type: NodeType, expected: &'static str },

    #[error("{} link of {node_type} node is already set", .link.name())]
    LinkAlreadySet { link: Link, node_type: NodeType },

    #[error("{node_type} node cannot be cloned, only literals can")]
    NotLiteral { node_type: NodeType },

    #[error("expected a {expected} node, found {actual}")]
    UnexpectedType { expected: NodeType, actual: NodeType },
}
