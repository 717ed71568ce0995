//! Graphviz DOT output

use std::fmt::Write as _;

use super::{render_with, GraphBuilder, RenderConfig, Renderer};
use crate::diagram::Diagram;

/// Builds a top-to-bottom `digraph`
#[derive(Debug)]
pub struct DotBuilder {
    output: String,
}

impl DotBuilder {
    pub fn new() -> Self {
        let mut output = String::from("digraph {\n");
        output.push_str("    rankdir=TB;\n");
        output.push_str("    node [shape=box];\n");
        Self { output }
    }
}

impl Default for DotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a DOT identifier or label, turning line breaks into `\n`
pub fn quote_dot(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

impl GraphBuilder for DotBuilder {
    fn add_node(&mut self, id: &str, label: &str) {
        let _ = writeln!(
            self.output,
            "    {} [label={}];",
            quote_dot(id),
            quote_dot(label)
        );
    }

    fn add_edge(&mut self, source: &str, target: &str, label: &str) {
        if label.is_empty() {
            let _ = writeln!(self.output, "    {} -> {};", quote_dot(source), quote_dot(target));
        } else {
            let _ = writeln!(
                self.output,
                "    {} -> {} [label={}];",
                quote_dot(source),
                quote_dot(target),
                quote_dot(label)
            );
        }
    }

    fn finish(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

/// Renders diagrams as Graphviz DOT
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer {
    config: RenderConfig,
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Renderer for DotRenderer {
    fn render(&self, diagram: &Diagram) -> String {
        render_with(diagram, &self.config, DotBuilder::new())
    }

    fn name(&self) -> &'static str {
        "dot"
    }
}
