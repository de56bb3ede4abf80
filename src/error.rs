//! Errors raised while building an apps-of-apps graph
//!
//! Only input problems are errors. Data-quality findings such as dangling
//! or broken edges are collected as [`crate::graph::Diagnostic`] instead.

use crate::models::{ArgoResourceKind, NodeId};

/// Fatal build errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Duplicate resource id: {id}")]
    DuplicateId { id: NodeId },

    #[error("Malformed {kind} descriptor: {reason}")]
    MalformedDescriptor {
        kind: ArgoResourceKind,
        reason: String,
    },

    #[error("Invalid node selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Unknown node: {id}")]
    UnknownNode { id: NodeId },
}

impl GraphError {
    /// True for errors caused by malformed input rather than a missing node
    pub fn is_validation(&self) -> bool {
        !matches!(self, GraphError::UnknownNode { .. })
    }

    /// The id the error refers to, when there is one
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            GraphError::DuplicateId { id } | GraphError::UnknownNode { id } => Some(id),
            _ => None,
        }
    }
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
