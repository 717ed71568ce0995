//! JSON export and import of a [`Diagram`]
//!
//! The document shape is
//! `{"nodes": {<id>: <label>, ...}, "edges": [[<source>, <target>, <label>], ...]}`.
//! Import is all-or-nothing: a document that does not match the shape yields
//! [`FlowError::MalformedDocument`] and no diagram.

use tracing::{debug, trace, warn};

use super::Diagram;
use crate::core::FlowError;

/// Conventional filename for exported diagrams
pub const DEFAULT_EXPORT_FILENAME: &str = "flowchart_config.json";

/// Serialize a diagram to compact UTF-8 JSON
pub fn export(diagram: &Diagram) -> Vec<u8> {
    trace!(
        node_count = diagram.node_count(),
        edge_count = diagram.edge_count(),
        "Exporting diagram"
    );
    serde_json::to_vec(diagram).expect("string-keyed document always serializes")
}

/// Serialize a diagram to indented UTF-8 JSON
pub fn export_pretty(diagram: &Diagram) -> Vec<u8> {
    serde_json::to_vec_pretty(diagram).expect("string-keyed document always serializes")
}

/// Parse a JSON document into a new diagram
pub fn import(bytes: &[u8]) -> Result<Diagram, FlowError> {
    trace!(input_len = bytes.len(), "Importing diagram");
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    if !value.is_object() {
        warn!("Import rejected: top-level value is not an object");
        return Err(FlowError::malformed_document(
            "top-level value must be an object",
        ));
    }

    // serde_json's `preserve_order` keeps node order through `Value`.
    let diagram: Diagram = serde_json::from_value(value).map_err(|err| {
        warn!(error = %err, "Import rejected");
        FlowError::from(err)
    })?;

    debug!(
        node_count = diagram.node_count(),
        edge_count = diagram.edge_count(),
        "Diagram imported"
    );
    Ok(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Edge;

    #[test]
    fn test_export_shape() {
        let diagram = Diagram::from_parts(
            vec![
                ("A".to_string(), "Start".to_string()),
                ("B".to_string(), "End".to_string()),
            ],
            vec![Edge::new("A", "B", "")],
        );
        let json = String::from_utf8(export(&diagram)).unwrap();
        assert_eq!(
            json,
            r#"{"nodes":{"A":"Start","B":"End"},"edges":[["A","B",""]]}"#
        );
    }

    #[test]
    fn test_export_empty_diagram() {
        let json = String::from_utf8(export(&Diagram::new())).unwrap();
        assert_eq!(json, r#"{"nodes":{},"edges":[]}"#);
    }

    #[test]
    fn test_export_pretty_parses_back() {
        let diagram = Diagram::default_protocol();
        let imported = import(&export_pretty(&diagram)).unwrap();
        assert_eq!(imported, diagram);
    }

    #[test]
    fn test_import_preserves_document_order() {
        let doc = br#"{"nodes":{"Z":"last","A":"first"},"edges":[]}"#;
        let diagram = import(doc).unwrap();
        let ids: Vec<_> = diagram.nodes().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["Z", "A"]);
    }

    #[test]
    fn test_import_ignores_unknown_keys() {
        let doc = br#"{"nodes":{},"edges":[],"version":2}"#;
        assert!(import(doc).unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_non_object() {
        let result = import(br#"[["A","B",""]]"#);
        assert!(matches!(result, Err(FlowError::MalformedDocument { .. })));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        let result = import(b"{\"nodes\":");
        assert!(matches!(result, Err(FlowError::MalformedDocument { .. })));
    }

    #[test]
    fn test_import_rejects_non_string_label() {
        let result = import(br#"{"nodes":{"A":1},"edges":[]}"#);
        assert!(matches!(result, Err(FlowError::MalformedDocument { .. })));
    }

    #[test]
    fn test_import_rejects_short_edge() {
        let result = import(br#"{"nodes":{"A":"a"},"edges":[["A","A"]]}"#);
        assert!(matches!(result, Err(FlowError::MalformedDocument { .. })));
    }
}
