//! JavaScript bindings for the style hooks.
//!
//! Entities, states and settings cross the boundary as JSON strings in the
//! dashboard's own shape, so the renderer can pass its element data through
//! unchanged.

use log::info;
use wasm_bindgen::prelude::*;

use crate::components::graph_styles::{
	BoxAncestry, EdgeData, ElementState, GraphStyleConfig, GraphStyles, NodeData, ViewSettings,
};

/// Set up console logging. Call once before constructing a [`GraphStyler`].
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
	crate::init_logging();
}

/// Style hooks exported to the graph renderer.
#[wasm_bindgen]
pub struct GraphStyler {
	styles: GraphStyles,
}

fn parse_or_default<T: serde::de::DeserializeOwned + Default>(json: Option<String>) -> Result<T, JsError> {
	match json {
		Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
		_ => Ok(T::default()),
	}
}

#[wasm_bindgen]
impl GraphStyler {
	/// Build from an optional JSON config; omitted fields keep their defaults.
	#[wasm_bindgen(constructor)]
	pub fn new(config_json: Option<String>) -> Result<GraphStyler, JsError> {
		let config = match config_json {
			Some(json) if !json.trim().is_empty() => GraphStyleConfig::from_json_str(&json)?,
			_ => GraphStyleConfig::default(),
		};
		info!("mesh-graph-styles: styler ready, max hosts {}", config.max_hosts);
		Ok(Self {
			styles: GraphStyles::new(config),
		})
	}

	/// Node style as JSON.
	#[wasm_bindgen(js_name = nodeStyle)]
	pub fn node_style(&self, node_json: &str, state_json: Option<String>) -> Result<String, JsError> {
		let node: NodeData = serde_json::from_str(node_json)?;
		let state: ElementState = parse_or_default(state_json)?;
		Ok(serde_json::to_string(&self.styles.node_style(&node, state))?)
	}

	/// Edge style as JSON.
	#[wasm_bindgen(js_name = edgeStyle)]
	pub fn edge_style(&self, edge_json: &str, state_json: Option<String>) -> Result<String, JsError> {
		let edge: EdgeData = serde_json::from_str(edge_json)?;
		let state: ElementState = parse_or_default(state_json)?;
		Ok(serde_json::to_string(&self.styles.edge_style(&edge, state))?)
	}

	/// Node label as HTML.
	#[wasm_bindgen(js_name = nodeLabel)]
	pub fn node_label(
		&self,
		node_json: &str,
		ancestry_json: Option<String>,
		state_json: Option<String>,
		settings_json: Option<String>,
	) -> Result<String, JsError> {
		let node: NodeData = serde_json::from_str(node_json)?;
		let ancestry: BoxAncestry = parse_or_default(ancestry_json)?;
		let state: ElementState = parse_or_default(state_json)?;
		let settings: ViewSettings = parse_or_default(settings_json)?;
		Ok(self.styles.node_label_html(&node, ancestry, state, &settings))
	}

	/// Edge label text. `target_json` is the destination node's data.
	#[wasm_bindgen(js_name = edgeLabel)]
	pub fn edge_label(
		&self,
		edge_json: &str,
		target_json: Option<String>,
		state_json: Option<String>,
		settings_json: Option<String>,
	) -> Result<String, JsError> {
		let edge: EdgeData = serde_json::from_str(edge_json)?;
		let target: Option<NodeData> = parse_or_default(target_json)?;
		let state: ElementState = parse_or_default(state_json)?;
		let settings: ViewSettings = parse_or_default(settings_json)?;
		Ok(self.styles.edge_label(&edge, target.as_ref(), state, &settings))
	}
}
