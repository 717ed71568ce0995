//! Mermaid flowchart output
//!
//! Mermaid identifiers are restricted to ASCII letters, digits and `_`, so
//! node IDs are mapped to safe identifiers on first sight. Distinct IDs that
//! sanitise to the same text get a numeric suffix. Labels are always quoted.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use super::{render_with, GraphBuilder, RenderConfig, Renderer};
use crate::diagram::Diagram;

/// Words Mermaid treats as keywords when used as bare node IDs
const RESERVED_IDS: [&str; 4] = ["end", "graph", "subgraph", "flowchart"];

/// Builds a `flowchart TD` document
#[derive(Debug)]
pub struct MermaidBuilder {
    output: String,
    ids: HashMap<String, String>,
    used: HashSet<String>,
}

impl MermaidBuilder {
    pub fn new() -> Self {
        Self {
            output: String::from("flowchart TD\n"),
            ids: HashMap::new(),
            used: HashSet::new(),
        }
    }

    /// Mermaid-safe identifier for `id`, stable for the builder's lifetime
    fn safe_id(&mut self, id: &str) -> String {
        if let Some(existing) = self.ids.get(id) {
            return existing.clone();
        }

        let mut base: String = id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if base.is_empty() || RESERVED_IDS.contains(&base.to_lowercase().as_str()) {
            base.insert(0, 'n');
        }

        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.used.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        self.used.insert(candidate.clone());
        self.ids.insert(id.to_string(), candidate.clone());
        candidate
    }
}

impl Default for MermaidBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a Mermaid label, using entity codes for `#` and quotes and `<br/>`
/// for breaks
pub fn quote_mermaid(text: &str) -> String {
    // `#` first, so the entities written below are not escaped again.
    let escaped = text
        .replace('\r', "")
        .replace('#', "#35;")
        .replace('"', "#quot;")
        .replace('\n', "<br/>");
    format!("\"{}\"", escaped)
}

impl GraphBuilder for MermaidBuilder {
    fn add_node(&mut self, id: &str, label: &str) {
        let safe = self.safe_id(id);
        let _ = writeln!(self.output, "    {}[{}]", safe, quote_mermaid(label));
    }

    fn add_edge(&mut self, source: &str, target: &str, label: &str) {
        let from = self.safe_id(source);
        let to = self.safe_id(target);
        if label.is_empty() {
            let _ = writeln!(self.output, "    {} --> {}", from, to);
        } else {
            let _ = writeln!(self.output, "    {} -->|{}| {}", from, quote_mermaid(label), to);
        }
    }

    fn finish(self) -> String {
        self.output
    }
}

/// Renders diagrams as Mermaid flowcharts
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer {
    config: RenderConfig,
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Renderer for MermaidRenderer {
    fn render(&self, diagram: &Diagram) -> String {
        render_with(diagram, &self.config, MermaidBuilder::new())
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }
}
