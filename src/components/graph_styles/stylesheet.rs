//! Per-element style hooks for the graph renderer.
//!
//! [`GraphStyles`] owns the immutable configuration and exposes one method per
//! renderer callback. It holds no other state, so a single instance can serve
//! every element of every refresh, from any thread.

use serde::Serialize;

use super::config::GraphStyleConfig;
use super::edge_label::compose_edge_label;
use super::label::{NodeLabel, compose_node_label};
use super::render::render_node_label;
use super::style::{EdgeStyle, NodeStyle, edge_style, node_style};
use super::types::{BoxAncestry, EdgeData, ElementState, GraphSnapshot, NodeData, ViewSettings};

/// Style hooks bound to one configuration.
#[derive(Clone, Debug, Default)]
pub struct GraphStyles {
	config: GraphStyleConfig,
}

/// Everything the renderer needs for one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyledNode {
	/// Node id.
	pub id: String,
	/// Resolved visual attributes.
	pub style: NodeStyle,
	/// Label HTML.
	pub label: String,
}

/// Everything the renderer needs for one edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyledEdge {
	/// Edge id.
	pub id: String,
	/// Resolved visual attributes.
	pub style: EdgeStyle,
	/// Label text, empty when nothing is shown.
	pub label: String,
}

/// A styled snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StyledGraph {
	/// Styled nodes, in snapshot order.
	pub nodes: Vec<StyledNode>,
	/// Styled edges, in snapshot order.
	pub edges: Vec<StyledEdge>,
}

impl GraphStyles {
	/// Bind the hooks to `config`.
	pub fn new(config: GraphStyleConfig) -> Self {
		Self { config }
	}

	/// The bound configuration.
	pub fn config(&self) -> &GraphStyleConfig {
		&self.config
	}

	/// Node style for `state`.
	pub fn node_style(&self, node: &NodeData, state: ElementState) -> NodeStyle {
		node_style(node, state, &self.config)
	}

	/// Edge style for `state`.
	pub fn edge_style(&self, edge: &EdgeData, state: ElementState) -> EdgeStyle {
		edge_style(edge, state, &self.config)
	}

	/// Structured node label.
	pub fn node_label(
		&self,
		node: &NodeData,
		ancestry: BoxAncestry,
		state: ElementState,
		settings: &ViewSettings,
	) -> NodeLabel {
		compose_node_label(node, ancestry, state, settings, &self.config)
	}

	/// Node label rendered as HTML.
	pub fn node_label_html(
		&self,
		node: &NodeData,
		ancestry: BoxAncestry,
		state: ElementState,
		settings: &ViewSettings,
	) -> String {
		render_node_label(&self.node_label(node, ancestry, state, settings), &self.config)
	}

	/// Edge label text. Selected edges get the verbose form.
	///
	/// `target` is the edge's destination node, when known; its circuit
	/// breaker decides whether a tripped breaker is flagged on the edge.
	pub fn edge_label(
		&self,
		edge: &EdgeData,
		target: Option<&NodeData>,
		state: ElementState,
		settings: &ViewSettings,
	) -> String {
		let dest_has_circuit_breaker = target.is_some_and(|node| node.has_circuit_breaker);
		compose_edge_label(edge, dest_has_circuit_breaker, settings, &self.config, state.selected)
	}

	/// Style every element of `snapshot` in its resting state.
	pub fn style_snapshot(&self, snapshot: &GraphSnapshot, settings: &ViewSettings) -> StyledGraph {
		let state = ElementState::default();
		let nodes = snapshot
			.nodes
			.iter()
			.map(|node| StyledNode {
				id: node.id.clone(),
				style: self.node_style(node, state),
				label: self.node_label_html(node, snapshot.ancestry(node), state, settings),
			})
			.collect();
		let edges = snapshot
			.edges
			.iter()
			.map(|edge| StyledEdge {
				id: edge.id.clone(),
				style: self.edge_style(edge, state),
				label: self.edge_label(edge, snapshot.target(edge), state, settings),
			})
			.collect();
		StyledGraph { nodes, edges }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_styles::types::{EdgeLabelMode, NodeType, Protocol};

	#[test]
	fn test_selected_edge_is_verbose() {
		let styles = GraphStyles::default();
		let edge = EdgeData {
			protocol: Protocol::Http,
			has_traffic: true,
			http: 10.0.into(),
			..Default::default()
		};
		let settings = ViewSettings {
			edge_labels: vec![EdgeLabelMode::TrafficRate],
			..Default::default()
		};
		assert_eq!(styles.edge_label(&edge, None, ElementState::default(), &settings), "10");
		let selected = ElementState {
			selected: true,
			..Default::default()
		};
		assert_eq!(styles.edge_label(&edge, None, selected, &settings), "http\n10 rps");
	}

	#[test]
	fn test_style_snapshot() {
		let snapshot: GraphSnapshot = serde_json::from_str(
			r#"{
				"nodes": [
					{ "id": "box", "nodeType": "box", "isBox": "app", "app": "reviews" },
					{ "id": "v1", "parent": "box", "nodeType": "app", "app": "reviews", "version": "v1" }
				],
				"edges": [
					{ "id": "e1", "source": "v1", "target": "v1", "protocol": "http", "hasTraffic": true, "http": "5" }
				]
			}"#,
		)
		.unwrap();
		let settings = ViewSettings {
			edge_labels: vec![EdgeLabelMode::TrafficRate],
			..Default::default()
		};
		let styled = GraphStyles::default().style_snapshot(&snapshot, &settings);
		assert_eq!(styled.nodes.len(), 2);
		assert!(styled.nodes[1].label.contains("<div>v1</div>"));
		assert_eq!(styled.edges[0].label, "5");

		let node = snapshot.node("v1").unwrap();
		assert_eq!(node.node_type, NodeType::App);
	}

	#[test]
	fn test_snapshot_flags_breaker_from_target_node() {
		let snapshot: GraphSnapshot = serde_json::from_str(
			r#"{
				"nodes": [
					{ "id": "a", "nodeType": "workload", "workload": "productpage" },
					{ "id": "b", "nodeType": "service", "service": "reviews", "hasCB": true }
				],
				"edges": [
					{ "id": "ab", "source": "a", "target": "b", "protocol": "http", "hasTraffic": true,
					  "http": 10, "responses": { "503": { "UO": "100.0" } } },
					{ "id": "ba", "source": "b", "target": "a", "protocol": "http", "hasTraffic": true,
					  "http": 10, "responses": { "503": { "UO": "100.0" } } }
				]
			}"#,
		)
		.unwrap();
		let settings = ViewSettings {
			edge_labels: vec![EdgeLabelMode::TrafficRate],
			..Default::default()
		};
		let styled = GraphStyles::default().style_snapshot(&snapshot, &settings);
		assert_eq!(styled.edges[0].label, "\u{26a1}\n10");
		assert_eq!(styled.edges[1].label, "10");
	}
}
