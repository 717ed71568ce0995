//! Human-readable listing of a diagram for the `show` command
//!
//! Colors are applied with crossterm when enabled: node IDs and edge indices
//! in cyan, edge labels in green, dangling-reference warnings in yellow.

use crossterm::style::{Color, Stylize};
use protoflow::diagram::Diagram;
use unicode_width::UnicodeWidthStr;

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{}", text.to_string().with(color))
    } else {
        text.to_string()
    }
}

/// Format nodes, edges and warnings as an indented listing
pub fn format_listing(diagram: &Diagram, colorize: bool) -> String {
    let mut out = String::new();

    let id_width = diagram
        .nodes()
        .map(|(id, _)| UnicodeWidthStr::width(id))
        .max().unwrap_or(0);
    out.push_str(&format!("Nodes ({}):\n", diagram.node_count()));
    for (id, label) in diagram.nodes() {
        let mut lines = label.lines();
        let first = lines.next().unwrap_or("");
        out.push_str(&format!(
            "  {}{}  {}\n",
            paint(id, Color::Cyan, colorize),
            " ".repeat(id_width - UnicodeWidthStr::width(id)),
            first
        ));
        for line in lines {
            out.push_str(&format!("  {}  {}\n", " ".repeat(id_width), line));
        }
    }

    out.push_str(&format!("\nEdges ({}):\n", diagram.edge_count()));
    for (index, edge) in diagram.edges().enumerate() {
        let marker = paint(&format!("[{}]", index), Color::Cyan, colorize);
        if edge.has_label() {
            out.push_str(&format!(
                "  {} {} -> {}  ({})\n",
                marker,
                edge.source,
                edge.target,
                paint(&edge.label, Color::Green, colorize)
            ));
        } else {
            out.push_str(&format!("  {} {} -> {}\n", marker, edge.source, edge.target));
        }
    }

    let warnings = diagram.dangling_references();
    if !warnings.is_empty() {
        out.push('\n');
        for warning in warnings {
            out.push_str(&paint(&format!("warning: {}", warning), Color::Yellow, colorize));
            out.push('\n');
        }
    }

    out
}
