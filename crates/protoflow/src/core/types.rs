//! Core type definitions for the flowchart model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed, optionally labelled connection between two node identifiers
///
/// Serialized as a `[source, target, label]` triple. An empty label means the
/// edge is unlabelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(String, String, String)",
    into = "(String, String, String)"
)]
pub struct Edge {
    /// Source node ID
    pub source: String,
    /// Target node ID
    pub target: String,
    /// Label, empty when unlabelled
    pub label: String,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }

    /// Create an edge without a label
    pub fn unlabeled(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, "")
    }

    /// Returns true if the edge carries a non-empty label
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }

    /// Borrow the edge as a `(source, target, label)` triple
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.source, &self.target, &self.label)
    }
}

impl From<(String, String, String)> for Edge {
    fn from((source, target, label): (String, String, String)) -> Self {
        Self {
            source,
            target,
            label,
        }
    }
}

impl From<Edge> for (String, String, String) {
    fn from(edge: Edge) -> Self {
        (edge.source, edge.target, edge.label)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{} --> {}", self.source, self.target)
        } else {
            write!(f, "{} --{}--> {}", self.source, self.label, self.target)
        }
    }
}

/// Which end of an edge a node identifier sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}
