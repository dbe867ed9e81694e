//! Color, shape and per-element style resolution.
//!
//! The individual resolvers are pure functions of entity state and the
//! palette. [`node_style`] and [`edge_style`] apply them in the same cascade
//! the renderer's stylesheet uses: defaults, box fill, selection, highlight,
//! then unhighlight.

use serde::Serialize;

use super::config::GraphStyleConfig;
use super::theme::{Color, Palette};
use super::types::{BoxKind, EdgeData, ElementState, HealthStatus, NodeData, NodeType, Protocol};

/// Resting node border width.
pub const NODE_BORDER_WIDTH: f64 = 1.0;
/// Selected node border width.
pub const NODE_BORDER_WIDTH_SELECTED: f64 = 3.0;
/// Leaf node width and height.
pub const NODE_SIZE: f64 = 25.0;
/// Resting edge width.
pub const EDGE_WIDTH: f64 = 2.0;
/// Selected edge width.
pub const EDGE_WIDTH_SELECTED: f64 = 4.0;
/// Opacity of elements outside the current highlight.
pub const OPACITY_UNHIGHLIGHT: f64 = 0.1;
/// Overlay opacity.
pub const OPACITY_OVERLAY: f64 = 0.3;
/// Overlay extent beyond the node, in pixels.
pub const OVERLAY_PADDING: f64 = 7.0;

/// Geometric node shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
	/// Workloads and unknown nodes.
	Ellipse,
	/// Aggregates.
	RoundPentagon,
	/// Apps and boxes.
	RoundRectangle,
	/// Service entries.
	RoundTag,
	/// Services.
	RoundTriangle,
}

/// Icon drawn inside a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImage {
	/// No icon.
	None,
	/// Node is not accessible to the current user.
	Key,
	/// Node lives outside the requested namespaces.
	Topology,
}

/// Node border line style; idle nodes are dotted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
	/// Solid line.
	Solid,
	/// Dotted line.
	Dotted,
}

/// Edge target arrow; TCP edges use a crossed triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowShape {
	/// Open arrowhead.
	Vee,
	/// Triangle with a crossbar.
	TriangleCross,
}

/// Highlight overlay drawn around a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Overlay {
	/// Overlay color.
	pub color: Color,
	/// Extent beyond the node, in pixels.
	pub padding: f64,
	/// Overlay opacity.
	pub opacity: f64,
}

/// Resolved visual attributes of a node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
	/// Node outline.
	pub shape: NodeShape,
	/// Width in pixels; boxes are sized by the renderer.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
	/// Fill color.
	pub background_color: Color,
	/// Icon inside the node.
	pub background_image: BackgroundImage,
	/// Icon offset, CSS length.
	pub background_position_x: &'static str,
	/// Icon offset, CSS length.
	pub background_position_y: &'static str,
	/// Border color.
	pub border_color: Color,
	/// Border line style.
	pub border_style: BorderStyle,
	/// Border width in pixels.
	pub border_width: f64,
	/// Node opacity.
	pub opacity: f64,
	/// Find or trace overlay, leaves only.
	pub overlay: Option<Overlay>,
}

/// Resolved visual attributes of an edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
	/// Line and arrow color.
	pub line_color: Color,
	/// Arrowhead at the target end.
	pub target_arrow_shape: ArrowShape,
	/// Line width in pixels.
	pub width: f64,
	/// Label font size in pixels.
	pub font_size: f64,
	/// Halo behind the label text.
	pub text_outline_color: Color,
	/// Edge opacity.
	pub opacity: f64,
}

/// Line and arrow color of an edge.
pub fn edge_color(edge: &EdgeData, palette: &Palette) -> Color {
	if !edge.has_traffic {
		return palette.edge_dead;
	}
	if edge.protocol == Protocol::Tcp {
		return palette.edge_tcp_with_traffic;
	}
	match edge.health_status {
		HealthStatus::Failure => palette.edge_failure,
		HealthStatus::Degraded => palette.edge_degraded,
		HealthStatus::Healthy | HealthStatus::Idle | HealthStatus::NotAvailable => palette.edge,
	}
}

/// Picks between the degraded, failure and fallback colors by health.
fn by_health(health: HealthStatus, degraded: Color, failure: Color, fallback: Color) -> Color {
	match health {
		HealthStatus::Degraded => degraded,
		HealthStatus::Failure => failure,
		HealthStatus::Healthy | HealthStatus::Idle | HealthStatus::NotAvailable => fallback,
	}
}

/// Resting border color of a node.
pub fn node_border_color(node: &NodeData, palette: &Palette) -> Color {
	if node.is_outer_box() {
		return palette.node_border_box;
	}
	by_health(
		node.health_status,
		palette.node_border_degraded,
		palette.node_border_failure,
		palette.node_border,
	)
}

/// Fill color of a highlighted (hovered) node.
pub fn node_hover_fill(node: &NodeData, palette: &Palette) -> Color {
	by_health(
		node.health_status,
		palette.node_fill_hover_degraded,
		palette.node_fill_hover_failure,
		palette.node_fill_hover,
	)
}

/// Border color of a highlighted (hovered) node.
pub fn node_hover_border(node: &NodeData, palette: &Palette) -> Color {
	by_health(
		node.health_status,
		palette.node_border_degraded,
		palette.node_border_failure,
		palette.node_border_hover,
	)
}

/// Border color of a selected node.
pub fn node_selected_border(node: &NodeData, palette: &Palette) -> Color {
	by_health(
		node.health_status,
		palette.node_border_degraded,
		palette.node_border_failure,
		palette.node_border_selected,
	)
}

/// Resting fill color; boxes are shaded by kind.
pub fn node_fill(node: &NodeData, palette: &Palette) -> Color {
	match node.is_box {
		Some(BoxKind::Cluster) => palette.node_fill_box_cluster,
		Some(BoxKind::Namespace) => palette.node_fill_box_namespace,
		Some(BoxKind::App) => palette.node_fill_box_app,
		Some(BoxKind::Unrecognized) | None => palette.node_fill,
	}
}

/// Shape by node type.
pub fn node_shape(node: &NodeData) -> NodeShape {
	match node.node_type {
		NodeType::Aggregate => NodeShape::RoundPentagon,
		NodeType::App | NodeType::Box => NodeShape::RoundRectangle,
		NodeType::Service if node.is_service_entry => NodeShape::RoundTag,
		NodeType::Service => NodeShape::RoundTriangle,
		NodeType::Unknown | NodeType::Workload | NodeType::Unrecognized => NodeShape::Ellipse,
	}
}

/// Icon drawn inside leaves that are inaccessible or outside the requested namespaces.
pub fn node_background_image(node: &NodeData) -> BackgroundImage {
	let is_box = node.is_box.is_some();
	if node.is_inaccessible && !node.is_service_entry && !is_box {
		return BackgroundImage::Key;
	}
	if node.is_outside && !is_box {
		return BackgroundImage::Topology;
	}
	BackgroundImage::None
}

/// Background image offset so icons sit visually centered in tags and
/// triangles.
pub fn node_background_position(shape: NodeShape) -> (&'static str, &'static str) {
	match shape {
		NodeShape::RoundTag => ("0", "50%"),
		NodeShape::RoundTriangle => ("50%", "6px"),
		NodeShape::Ellipse | NodeShape::RoundPentagon | NodeShape::RoundRectangle => ("50%", "50%"),
	}
}

/// Dotted for idle nodes.
pub fn node_border_style(node: &NodeData) -> BorderStyle {
	if node.is_idle { BorderStyle::Dotted } else { BorderStyle::Solid }
}

/// Full style of a node in the given interaction state.
pub fn node_style(node: &NodeData, state: ElementState, config: &GraphStyleConfig) -> NodeStyle {
	let palette = &config.palette;
	let shape = node_shape(node);
	let (background_position_x, background_position_y) = node_background_position(shape);
	let is_box = node.is_box.is_some();

	let mut style = NodeStyle {
		shape,
		width: NODE_SIZE,
		height: NODE_SIZE,
		background_color: node_fill(node, palette),
		background_image: node_background_image(node),
		background_position_x,
		background_position_y,
		border_color: node_border_color(node, palette),
		border_style: node_border_style(node),
		border_width: NODE_BORDER_WIDTH,
		opacity: 1.0,
		overlay: None,
	};

	if state.selected {
		style.border_color = node_selected_border(node, palette);
		style.border_width = NODE_BORDER_WIDTH_SELECTED;
	}
	if state.highlighted && !is_box {
		style.background_color = node_hover_fill(node, palette);
		style.border_color = node_hover_border(node, palette);
	}
	if state.unhighlighted {
		style.opacity = OPACITY_UNHIGHLIGHT;
	}
	if !is_box {
		// Span is declared after find, so it wins when both apply.
		let overlay = if state.span {
			Some(palette.overlay_span)
		} else if state.find {
			Some(palette.overlay_find)
		} else {
			None
		};
		style.overlay = overlay.map(|color| Overlay {
			color,
			padding: OVERLAY_PADDING,
			opacity: OPACITY_OVERLAY,
		});
	}

	style
}

/// Full style of an edge in the given interaction state.
pub fn edge_style(edge: &EdgeData, state: ElementState, config: &GraphStyleConfig) -> EdgeStyle {
	EdgeStyle {
		line_color: edge_color(edge, &config.palette),
		target_arrow_shape: if edge.protocol == Protocol::Tcp {
			ArrowShape::TriangleCross
		} else {
			ArrowShape::Vee
		},
		width: if state.selected { EDGE_WIDTH_SELECTED } else { EDGE_WIDTH },
		font_size: config.fonts.edge_font_size(state.highlighted),
		text_outline_color: config.palette.edge_text_outline,
		opacity: if state.unhighlighted { OPACITY_UNHIGHLIGHT } else { 1.0 },
	}
}
