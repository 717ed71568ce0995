//! Integration tests for the public editing API

use protoflow::diagram::{export, import};
use protoflow::prelude::*;

#[test]
fn test_add_step_to_default_protocol() {
    let mut diagram = Diagram::default_protocol();
    assert!(diagram.add_node("R", "New Step"));
    let outcome = diagram.add_edge("Q", "R", "");

    assert!(outcome.applied);
    assert!(outcome.warnings.is_empty());
    assert_eq!(diagram.node_count(), 18);
    assert_eq!(diagram.edge_count(), 17);
    assert_eq!(
        diagram.edges().last().map(Edge::as_tuple),
        Some(("Q", "R", ""))
    );
}

#[test]
fn test_default_protocol_survives_export_import() {
    let original = Diagram::default_protocol();
    let mut fresh = Session::new();
    fresh.import(&export(&original)).unwrap();

    let restored = fresh.into_diagram();
    assert_eq!(restored.node_count(), 17);
    assert_eq!(restored, original);

    let original_edges: Vec<_> = original.edges().map(Edge::as_tuple).collect();
    let restored_edges: Vec<_> = restored.edges().map(Edge::as_tuple).collect();
    assert_eq!(original_edges, restored_edges);
}

#[test]
fn test_empty_node_arguments_are_ignored() {
    let mut diagram = Diagram::default_protocol();
    let before: Vec<(String, String)> = diagram
        .nodes()
        .map(|(id, label)| (id.to_string(), label.to_string()))
        .collect();

    assert!(!diagram.add_node("", "text"));
    assert!(!diagram.add_node("X", ""));

    let after: Vec<(String, String)> = diagram
        .nodes()
        .map(|(id, label)| (id.to_string(), label.to_string()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_empty_edge_endpoints_are_ignored() {
    let mut diagram = Diagram::default_protocol();
    let before: Vec<Edge> = diagram.edges().cloned().collect();

    assert!(!diagram.add_edge("", "Y", "L").applied);
    assert!(!diagram.add_edge("X", "", "L").applied);

    let after: Vec<Edge> = diagram.edges().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn test_add_edge_appends_exactly_one_triple() {
    let mut diagram = Diagram::default_protocol();
    let before = diagram.edge_count();
    diagram.add_edge("X", "Y", "L");
    assert_eq!(diagram.edge_count(), before + 1);
    assert_eq!(diagram.edge(before).map(Edge::as_tuple), Some(("X", "Y", "L")));
}

#[test]
fn test_edit_labels_in_place() {
    let mut diagram = Diagram::default_protocol();
    diagram
        .set_node_label("C", "Is anyone hurt\nor at risk?")
        .unwrap();
    diagram.update_edge(3, "C", "E", "No one hurt");

    let imported = import(&export(&diagram)).unwrap();
    assert_eq!(imported.node_label("C"), Some("Is anyone hurt\nor at risk?"));
    assert_eq!(imported.edge(3).map(Edge::as_tuple), Some(("C", "E", "No one hurt")));
}

#[test]
fn test_rendering_follows_edits() {
    let mut session = Session::new();
    session.diagram_mut().add_node("R", "Share lessons learned");
    session.diagram_mut().add_edge("Q", "R", "Follow-up");

    let dot = to_dot(session.diagram(), &RenderConfig::default());
    assert!(dot.contains("\"R\" [label=\"Share lessons learned\"];"));
    assert!(dot.contains("\"Q\" -> \"R\" [label=\"Follow-up\"];"));
}
