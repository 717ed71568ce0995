//! Core error types for flowchart editing
//!
//! This module defines the error kinds raised by the diagram store, the
//! serializer and the shells built on top of them.

use thiserror::Error;

use super::Endpoint;

/// Core error types for flowchart editing
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },

    /// Non-fatal: reported as a warning, never blocks a write.
    #[error("Dangling edge reference: edge {edge_index} {endpoint} refers to unknown node '{node_id}'")]
    DanglingEdgeReference {
        edge_index: usize,
        endpoint: Endpoint,
        node_id: String,
    },

    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Edge index {index} out of range (diagram has {len} edges)")]
    EdgeIndexOutOfRange { index: usize, len: usize },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl FlowError {
    /// Create a new malformed document error
    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    /// Create a new dangling edge reference
    pub fn dangling_edge(edge_index: usize, endpoint: Endpoint, node_id: impl Into<String>) -> Self {
        Self::DanglingEdgeReference {
            edge_index,
            endpoint,
            node_id: node_id.into(),
        }
    }

    /// Create a new node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Returns true for error kinds that are surfaced as warnings only
    pub fn is_warning(&self) -> bool {
        matches!(self, FlowError::DanglingEdgeReference { .. })
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed_document(err.to_string())
    }
}
