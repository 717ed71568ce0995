//! Diagram store
//!
//! Owns the node-label mapping and the edge list and applies edits to them.
//! Node order is insertion order and only affects display. Edges may name
//! identifiers that have no node; such references are reported as warnings
//! but never rejected.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::defaults::{default_edges, default_nodes};
use crate::core::{Edge, Endpoint, FlowError};

/// Result of an append operation on the store
///
/// `applied` is false when the edit was ignored because a required argument
/// was empty. `warnings` holds dangling references introduced by the edit.
#[derive(Debug, Default)]
pub struct EditOutcome {
    pub applied: bool,
    pub warnings: Vec<FlowError>,
}

impl EditOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn applied(warnings: Vec<FlowError>) -> Self {
        Self {
            applied: true,
            warnings,
        }
    }
}

/// A protocol flowchart: labelled nodes plus directed edges
///
/// Serializes to `{"nodes": {id: label, ...}, "edges": [[source, target, label], ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    /// Node labels keyed by ID, in insertion order
    nodes: IndexMap<String, String>,
    /// Edges in display order
    edges: Vec<Edge>,
}

impl Diagram {
    /// Create an empty diagram
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the built-in incident management protocol
    pub fn default_protocol() -> Self {
        Self {
            nodes: default_nodes().collect(),
            edges: default_edges().collect(),
        }
    }

    /// Build a diagram from parts without validation
    pub fn from_parts(
        nodes: impl IntoIterator<Item = (String, String)>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        }
    }

    /// Overwrite the label of an existing node
    ///
    /// New identifiers go through [`Diagram::add_node`]; an unknown `id`
    /// returns [`FlowError::NodeNotFound`] and leaves the diagram untouched.
    pub fn set_node_label(&mut self, id: &str, text: impl Into<String>) -> Result<(), FlowError> {
        match self.nodes.get_mut(id) {
            Some(label) => {
                *label = text.into();
                trace!(node_id = %id, "Node label updated");
                Ok(())
            }
            None => {
                debug!(node_id = %id, "Label edit for unknown node");
                Err(FlowError::node_not_found(id))
            }
        }
    }

    /// Insert a node, or overwrite the label of an existing one
    ///
    /// Empty `id` or `text` is ignored and `false` is returned. An overwritten
    /// node keeps its display position.
    pub fn add_node(&mut self, id: impl Into<String>, text: impl Into<String>) -> bool {
        let id = id.into();
        let text = text.into();
        if id.is_empty() || text.is_empty() {
            debug!(node_id = %id, label_empty = text.is_empty(), "Ignoring node with empty id or label");
            return false;
        }

        trace!(node_id = %id, node_label = %text, "Adding node");
        self.nodes.insert(id, text);
        debug!(node_count = self.node_count(), "Node added");
        true
    }

    /// Replace the edge at `index`
    ///
    /// Returns dangling-reference warnings for the new edge.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Use [`Diagram::try_update_edge`]
    /// when the index comes from user input.
    pub fn update_edge(
        &mut self,
        index: usize,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Vec<FlowError> {
        let len = self.edges.len();
        assert!(index < len, "edge index {index} out of range (len {len})");
        self.replace_edge(index, Edge::new(source, target, label))
    }

    /// Replace the edge at `index`, rejecting an out-of-range index
    pub fn try_update_edge(
        &mut self,
        index: usize,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Vec<FlowError>, FlowError> {
        if index >= self.edges.len() {
            return Err(FlowError::EdgeIndexOutOfRange {
                index,
                len: self.edges.len(),
            });
        }
        Ok(self.replace_edge(index, Edge::new(source, target, label)))
    }

    fn replace_edge(&mut self, index: usize, edge: Edge) -> Vec<FlowError> {
        trace!(edge_index = index, edge = %edge, "Replacing edge");
        let warnings = self.check_edge(index, &edge);
        self.edges[index] = edge;
        warnings
    }

    /// Append an edge
    ///
    /// Empty `source` or `target` is ignored. `label` may be empty.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> EditOutcome {
        let edge = Edge::new(source, target, label);
        if edge.source.is_empty() || edge.target.is_empty() {
            debug!(edge_from = %edge.source, edge_to = %edge.target, "Ignoring edge with empty endpoint");
            return EditOutcome::ignored();
        }

        trace!(edge_from = %edge.source, edge_to = %edge.target, edge_label = %edge.label, "Adding edge");
        let warnings = self.check_edge(self.edges.len(), &edge);
        self.edges.push(edge);
        debug!(edge_count = self.edge_count(), "Edge added");
        EditOutcome::applied(warnings)
    }

    /// Dangling references for a single edge at `index`
    fn check_edge(&self, index: usize, edge: &Edge) -> Vec<FlowError> {
        let mut warnings = Vec::new();
        for (endpoint, id) in [(Endpoint::Source, &edge.source), (Endpoint::Target, &edge.target)] {
            if !self.nodes.contains_key(id.as_str()) {
                warn!(edge_index = index, %endpoint, node_id = %id, "Edge refers to unknown node");
                warnings.push(FlowError::dangling_edge(index, endpoint, id.clone()));
            }
        }
        warnings
    }

    /// Every dangling reference in the diagram, in edge order
    pub fn dangling_references(&self) -> Vec<FlowError> {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(index, edge)| self.check_edge(index, edge))
            .collect()
    }

    /// Get the label of a node
    pub fn node_label(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(String::as_str)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over `(id, label)` pairs in display order
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes.iter().map(|(id, label)| (id.as_str(), label.as_str()))
    }

    /// Iterate over edges in display order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get the edge at `index`
    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the diagram has no nodes and no edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
