//! WebAssembly bindings for the browser editor
//!
//! Exposes a [`FlowchartEditor`] class that owns one editing session. The
//! page calls the edit methods from its form handlers and re-renders the
//! returned DOT or Mermaid text after every interaction.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::core::FlowError;
#[cfg(target_arch = "wasm32")]
use crate::diagram::Session;
#[cfg(target_arch = "wasm32")]
use crate::render::{to_dot, to_mermaid, RenderConfig};

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

#[cfg(target_arch = "wasm32")]
fn to_js(err: FlowError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(target_arch = "wasm32")]
fn warnings_json(warnings: &[FlowError]) -> String {
    let messages: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
    serde_json::to_string(&messages).unwrap_or_else(|_| "[]".to_string())
}

/// Browser-side flowchart editor bound to a single session
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct FlowchartEditor {
    session: Session,
    config: RenderConfig,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl FlowchartEditor {
    /// Create an editor holding the default protocol
    #[wasm_bindgen(constructor)]
    pub fn new() -> FlowchartEditor {
        FlowchartEditor {
            session: Session::new(),
            config: RenderConfig::new(true, 0),
        }
    }

    /// Toggle `"A: label"` style node text in rendered output
    #[wasm_bindgen(js_name = setPrefixIds)]
    pub fn set_prefix_ids(&mut self, prefix_ids: bool) {
        self.config.prefix_ids = prefix_ids;
    }

    /// Overwrite an existing node label; throws for unknown IDs
    #[wasm_bindgen(js_name = setNodeLabel)]
    pub fn set_node_label(&mut self, id: &str, text: &str) -> Result<(), JsValue> {
        self.session.diagram_mut().set_node_label(id, text).map_err(to_js)
    }

    /// Add or overwrite a node; returns false when ignored
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, id: &str, text: &str) -> bool {
        self.session.diagram_mut().add_node(id, text)
    }

    /// Replace an edge; returns dangling warnings as a JSON array of strings
    #[wasm_bindgen(js_name = updateEdge)]
    pub fn update_edge(
        &mut self,
        index: usize,
        source: &str,
        target: &str,
        label: &str,
    ) -> Result<String, JsValue> {
        let warnings = self
            .session
            .diagram_mut()
            .try_update_edge(index, source, target, label)
            .map_err(to_js)?;
        Ok(warnings_json(&warnings))
    }

    /// Append an edge; returns false when ignored
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) -> bool {
        self.session.diagram_mut().add_edge(source, target, label).applied
    }

    /// The export document as a string
    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&mut self) -> String {
        String::from_utf8_lossy(&self.session.export()).into_owned()
    }

    /// Replace the diagram; throws on a malformed document and keeps the old one
    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, json: &str) -> Result<String, JsValue> {
        let report = self.session.import(json.as_bytes()).map_err(to_js)?;
        Ok(serde_json::json!({
            "node_count": report.node_count,
            "edge_count": report.edge_count,
            "warnings": report.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        })
        .to_string())
    }

    /// Render as Graphviz DOT
    #[wasm_bindgen(js_name = toDot)]
    pub fn to_dot(&mut self) -> String {
        let config = self.config;
        to_dot(self.session.diagram(), &config)
    }

    /// Render as a Mermaid flowchart
    #[wasm_bindgen(js_name = toMermaid)]
    pub fn to_mermaid(&mut self) -> String {
        let config = self.config;
        to_mermaid(self.session.diagram(), &config)
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&mut self) -> usize {
        self.session.diagram().node_count()
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&mut self) -> usize {
        self.session.diagram().edge_count()
    }

    /// Dangling references as a JSON array of strings
    #[wasm_bindgen(js_name = danglingWarnings)]
    pub fn dangling_warnings(&mut self) -> String {
        warnings_json(&self.session.diagram().dangling_references())
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for FlowchartEditor {
    fn default() -> Self {
        Self::new()
    }
}
