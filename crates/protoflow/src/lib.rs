//! Protoflow - an editable incident management protocol flowchart
//!
//! The whole editable state is a [`Diagram`](diagram::Diagram): node labels
//! keyed by identifier plus an ordered list of labelled edges. Diagrams are
//! exported to and imported from a flat JSON document and rendered through
//! graph-description builders (Graphviz DOT, Mermaid).
//!
//! # Quick Start
//!
//! ```rust
//! use protoflow::prelude::*;
//!
//! let mut session = Session::new();
//! let diagram = session.diagram_mut();
//! assert_eq!(diagram.node_count(), 17);
//!
//! diagram.add_node("R", "New Step");
//! diagram.add_edge("Q", "R", "");
//!
//! let json = session.export();
//! let restored = protoflow::diagram::import(&json).unwrap();
//! assert_eq!(restored.edge_count(), 17);
//! ```

pub mod core;
pub mod diagram;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Edge, Endpoint, FlowError};
    pub use crate::diagram::{Diagram, EditOutcome, ImportReport, Session};
    pub use crate::render::{
        to_dot, to_mermaid, DotRenderer, GraphBuilder, MermaidRenderer, OutputFormat,
        RenderConfig, Renderer,
    };
}

/// Render an exported JSON document in the given format
///
/// # Example
/// ```rust
/// use protoflow::{render, render::OutputFormat};
///
/// let doc = br#"{"nodes":{"A":"Start","B":"End"},"edges":[["A","B",""]]}"#;
/// let dot = render(doc, OutputFormat::Dot).unwrap();
/// assert!(dot.contains("\"A\" -> \"B\";"));
/// ```
pub fn render(document: &[u8], format: render::OutputFormat) -> anyhow::Result<String> {
    let diagram = diagram::import(document)?;
    Ok(format.render(&diagram, &render::RenderConfig::default()))
}

/// Export the built-in protocol as a JSON document
pub fn default_document() -> Vec<u8> {
    diagram::export(&diagram::Diagram::default_protocol())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;

    #[test]
    fn test_render_default_document_as_dot() {
        let output = render(&default_document(), OutputFormat::Dot).unwrap();
        assert!(output.contains("rankdir=TB"));
        assert!(output.contains("Close incident"));
    }

    #[test]
    fn test_render_default_document_as_mermaid() {
        let output = render(&default_document(), OutputFormat::Mermaid).unwrap();
        assert!(output.starts_with("flowchart TD"));
    }

    #[test]
    fn test_render_rejects_malformed_document() {
        let result = render(br#"{"nodes":{}}"#, OutputFormat::Dot);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Malformed document"));
    }
}
