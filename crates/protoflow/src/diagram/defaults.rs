//! Built-in violent incident management protocol
//!
//! Every new session starts from this diagram: 17 steps `A`..`Q` joined by
//! 16 edges, with `Yes`/`No` branches out of the decision steps.

use crate::core::Edge;

const DEFAULT_NODES: [(&str, &str); 17] = [
    ("A", "Violent incident occurs"),
    ("B", "Ensure immediate safety\nof staff, patients and visitors"),
    ("C", "Is anyone injured?"),
    ("D", "Provide first aid and\ncall the emergency team"),
    ("E", "Assess ongoing risk"),
    ("F", "Is the aggressor still\na threat?"),
    ("G", "Call security / police"),
    ("H", "Begin verbal\nde-escalation"),
    ("I", "Evacuate and secure\nthe area"),
    ("J", "Is de-escalation\nworking?"),
    ("K", "Document the incident\nin the incident log"),
    ("L", "Request the physical\nintervention team"),
    ("M", "Notify line manager\nand senior on duty"),
    ("N", "Offer debrief and support\nto everyone involved"),
    ("O", "Complete formal\nincident report"),
    ("P", "Review risk assessment\nand care plan"),
    ("Q", "Close incident"),
];

const DEFAULT_EDGES: [(&str, &str, &str); 16] = [
    ("A", "B", ""),
    ("B", "C", ""),
    ("C", "D", "Yes"),
    ("C", "E", "No"),
    ("E", "F", ""),
    ("F", "G", "Yes"),
    ("F", "H", "No"),
    ("G", "I", ""),
    ("H", "J", ""),
    ("J", "K", "Yes"),
    ("J", "L", "No"),
    ("K", "M", ""),
    ("M", "N", ""),
    ("N", "O", ""),
    ("O", "P", ""),
    ("P", "Q", ""),
];

/// Default node labels in display order
pub(crate) fn default_nodes() -> impl Iterator<Item = (String, String)> {
    DEFAULT_NODES
        .iter()
        .map(|(id, label)| (id.to_string(), label.to_string()))
}

/// Default edges in display order
pub(crate) fn default_edges() -> impl Iterator<Item = Edge> {
    DEFAULT_EDGES
        .iter()
        .map(|(source, target, label)| Edge::new(*source, *target, *label))
}
