//! Rendering adapters
//!
//! A diagram is rendered by replaying it into a [`GraphBuilder`]: one
//! `add_node` call per node in display order, then one `add_edge` call per
//! edge in display order. Builders emit text for an external graph tool
//! (Graphviz DOT, Mermaid). The layout direction is always top to bottom.
//!
//! ```rust
//! use protoflow::prelude::*;
//!
//! let diagram = Diagram::default_protocol();
//! let dot = to_dot(&diagram, &RenderConfig::default());
//! assert!(dot.starts_with("digraph"));
//! ```

mod dot;
mod mermaid;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, span, Level};

use crate::core::wrap_label;
use crate::diagram::Diagram;

pub use dot::*;
pub use mermaid::*;

/// Options applied to node labels before they reach a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    /// Prefix each node label with its identifier (`"A: label"`)
    pub prefix_ids: bool,
    /// Wrap label lines to this many display columns; 0 disables wrapping
    pub wrap_width: usize,
}

impl RenderConfig {
    /// Create a config with explicit settings
    pub fn new(prefix_ids: bool, wrap_width: usize) -> Self {
        Self {
            prefix_ids,
            wrap_width,
        }
    }

    /// The text handed to the builder for a node
    pub fn node_text(&self, id: &str, label: &str) -> String {
        let text = if self.prefix_ids {
            format!("{}: {}", id, label)
        } else {
            label.to_string()
        };
        if self.wrap_width == 0 {
            text
        } else {
            wrap_label(&text, self.wrap_width).join("\n")
        }
    }
}

/// Receiver of node and edge creation calls
///
/// Labels use `\n` for line breaks; builders translate them into their
/// output syntax.
pub trait GraphBuilder {
    /// Declare a node
    fn add_node(&mut self, id: &str, label: &str);

    /// Declare a directed edge; `label` is empty for unlabelled edges
    fn add_edge(&mut self, source: &str, target: &str, label: &str);

    /// Produce the final output
    fn finish(self) -> String;
}

/// Replay `diagram` into `builder`
pub fn render_with<B: GraphBuilder>(diagram: &Diagram, config: &RenderConfig, mut builder: B) -> String {
    let render_span = span!(
        Level::DEBUG,
        "render",
        node_count = diagram.node_count(),
        edge_count = diagram.edge_count()
    );
    let _enter = render_span.enter();

    for (id, label) in diagram.nodes() {
        builder.add_node(id, &config.node_text(id, label));
    }
    for edge in diagram.edges() {
        builder.add_edge(&edge.source, &edge.target, &edge.label);
    }

    let output = builder.finish();
    debug!(output_len = output.len(), "Render completed");
    output
}

/// Common interface for the text renderers
pub trait Renderer {
    /// Render the diagram to text
    fn render(&self, diagram: &Diagram) -> String;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;
}

/// Render a diagram as Graphviz DOT
pub fn to_dot(diagram: &Diagram, config: &RenderConfig) -> String {
    render_with(diagram, config, DotBuilder::new())
}

/// Render a diagram as a Mermaid flowchart
pub fn to_mermaid(diagram: &Diagram, config: &RenderConfig) -> String {
    render_with(diagram, config, MermaidBuilder::new())
}

/// Output formats understood by the shells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputFormat {
    /// Graphviz DOT
    #[default]
    Dot,
    /// Mermaid flowchart text
    Mermaid,
    /// The export document, indented
    Json,
}

impl OutputFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["dot", "mermaid", "json"]
    }

    /// Render `diagram` in this format
    pub fn render(&self, diagram: &Diagram, config: &RenderConfig) -> String {
        match self {
            OutputFormat::Dot => DotRenderer::with_config(*config).render(diagram),
            OutputFormat::Mermaid => MermaidRenderer::with_config(*config).render(diagram),
            OutputFormat::Json => {
                String::from_utf8_lossy(&crate::diagram::export_pretty(diagram)).into_owned()
            }
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
