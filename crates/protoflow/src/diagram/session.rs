//! Per-user editing session
//!
//! A session owns at most one [`Diagram`]. The first access creates the
//! built-in protocol; imports replace the diagram wholesale.

use tracing::{debug, info};

use super::{serializer, Diagram};
use crate::core::FlowError;

/// Success indicator returned by [`Session::import`]
#[derive(Debug)]
pub struct ImportReport {
    pub node_count: usize,
    pub edge_count: usize,
    /// Dangling references in the imported diagram
    pub warnings: Vec<FlowError>,
}

impl ImportReport {
    /// Returns true if the imported diagram has no dangling references
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Explicitly owned editing state for one user
#[derive(Debug, Default)]
pub struct Session {
    diagram: Option<Diagram>,
}

impl Session {
    /// Create a session with no diagram yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session around an existing diagram
    pub fn with_diagram(diagram: Diagram) -> Self {
        Self {
            diagram: Some(diagram),
        }
    }

    /// Returns true once a diagram has been created or imported
    pub fn is_initialized(&self) -> bool {
        self.diagram.is_some()
    }

    /// The current diagram, creating the default protocol on first use
    pub fn diagram(&mut self) -> &Diagram {
        self.diagram_mut()
    }

    /// Mutable access to the current diagram, creating the default protocol on first use
    pub fn diagram_mut(&mut self) -> &mut Diagram {
        self.diagram.get_or_insert_with(|| {
            debug!("Creating default protocol for session");
            Diagram::default_protocol()
        })
    }

    /// Replace the diagram with a parsed JSON document
    ///
    /// On error the session is left exactly as it was.
    pub fn import(&mut self, bytes: &[u8]) -> Result<ImportReport, FlowError> {
        let diagram = serializer::import(bytes)?;
        let report = ImportReport {
            node_count: diagram.node_count(),
            edge_count: diagram.edge_count(),
            warnings: diagram.dangling_references(),
        };
        self.diagram = Some(diagram);
        info!(
            node_count = report.node_count,
            edge_count = report.edge_count,
            warning_count = report.warnings.len(),
            "Configuration imported"
        );
        Ok(report)
    }

    /// Export the current diagram as compact JSON
    pub fn export(&mut self) -> Vec<u8> {
        serializer::export(self.diagram())
    }

    /// Discard the current diagram in favour of the default protocol
    pub fn reset(&mut self) {
        self.diagram = Some(Diagram::default_protocol());
    }

    /// Take the diagram out of the session
    pub fn into_diagram(self) -> Diagram {
        self.diagram.unwrap_or_else(Diagram::default_protocol)
    }
}
