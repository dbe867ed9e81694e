//! Node label composition.
//!
//! Produces a structured [`NodeLabel`] describing what a node label shows:
//! the badge block, the content lines, and for leaves an optional host list.
//! Turning that structure into markup is the job of [`super::render`].

use log::warn;
use serde::Serialize;

use super::badges::{Badge, BadgeToggles, compose_badges};
use super::config::GraphStyleConfig;
use super::scale::{FONT_SIZE_RATIO_HOVER, FONT_SIZE_RATIO_HOVER_BOX, LabelScale};
use super::types::{BoxAncestry, BoxKind, ElementState, GraphType, NodeData, NodeType, UNKNOWN, ViewSettings};

/// Top margin of leaf and app box labels, in pixels.
pub const MARGIN_TOP_DEFAULT: f64 = 4.0;
/// Top margin of cluster and namespace box labels, in pixels.
pub const MARGIN_TOP_OUTER_BOX: f64 = 13.0;
/// Label opacity while another element is highlighted.
pub const OPACITY_UNHIGHLIGHT: f64 = 0.6;

/// Shape of the label container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelVariant {
	/// Plain node label, with an optional host list.
	Leaf,
	/// Box label with a kind badge.
	Box(BoxKind),
}

/// Badge icons shown to the left of the label text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BadgeBlock {
	/// Left-to-right display order.
	pub badges: Vec<Badge>,
	/// Hidden at zoom levels where badges are too small.
	pub visible: bool,
}

/// Kind marker shown inside a box label (`A`, `C`, `NS`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxBadge {
	/// Badge text.
	pub text: String,
	/// App boxes pin their badge to the base label font.
	pub font_size: Option<f64>,
}

/// The text portion of a label.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelContent {
	/// Name first, then qualifiers.
	pub lines: Vec<String>,
	/// Hidden at zoom levels where text is too small.
	pub visible: bool,
	/// Text size; highlighted labels grow.
	pub font_size: f64,
	/// Drawn flush against a visible badge block.
	pub attached_to_badges: bool,
	/// Box kind marker, boxes only.
	pub box_badge: Option<BoxBadge>,
}

/// Hostnames revealed when hovering a leaf label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HostList {
	/// Display lines, including a trailing "N more hosts..." when truncated.
	pub lines: Vec<String>,
}

/// A fully composed node label.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLabel {
	/// Leaf or box layout.
	pub variant: LabelVariant,
	/// Neither text nor badges are legible at this zoom.
	pub hidden: bool,
	/// Base font size.
	pub font_size: f64,
	/// One pixel above the font size.
	pub line_height: f64,
	/// Set while another element is highlighted.
	pub opacity: Option<f64>,
	/// Offset below the node.
	pub margin_top: f64,
	/// Present when the node has any badge.
	pub badges: Option<BadgeBlock>,
	/// Text portion.
	pub content: LabelContent,
	/// Hover-revealed hostnames, leaves only.
	pub hosts: Option<HostList>,
}

/// Compose the label for `node`.
pub fn compose_node_label(
	node: &NodeData,
	ancestry: BoxAncestry,
	state: ElementState,
	settings: &ViewSettings,
	config: &GraphStyleConfig,
) -> NodeLabel {
	let fonts = &config.fonts;
	let scale = LabelScale::new(fonts, settings.zoom, settings.force_labels);

	let badges = compose_badges(
		node,
		BadgeToggles {
			show_missing_sidecars: settings.show_missing_sidecars,
			show_virtual_services: settings.show_virtual_services,
		},
	);
	let has_badges = !badges.is_empty();
	let hidden = scale.hides_label(has_badges);

	let badges = has_badges.then(|| BadgeBlock {
		badges,
		visible: hidden || !scale.no_badge,
	});

	let content_font = if state.highlighted {
		if node.is_outer_box() {
			fonts.font_label * FONT_SIZE_RATIO_HOVER_BOX
		} else {
			fonts.font_label * FONT_SIZE_RATIO_HOVER
		}
	} else {
		fonts.font_label
	};

	let mut lines = primary_lines(node, ancestry, settings);
	lines.extend(qualifier_lines(node, ancestry, settings));

	let font_size = if state.highlighted {
		fonts.font_label * FONT_SIZE_RATIO_HOVER
	} else {
		fonts.font_label
	};

	let (variant, box_badge, hosts, margin_top) = match node.is_box {
		Some(kind) => {
			let box_badge = box_badge(kind, config);
			let margin_top = match kind {
				BoxKind::Cluster | BoxKind::Namespace => MARGIN_TOP_OUTER_BOX,
				BoxKind::App | BoxKind::Unrecognized => MARGIN_TOP_DEFAULT,
			};
			(LabelVariant::Box(kind), box_badge, None, margin_top)
		}
		None => (
			LabelVariant::Leaf,
			None,
			host_list(node, config.max_hosts),
			MARGIN_TOP_DEFAULT,
		),
	};

	NodeLabel {
		variant,
		hidden,
		font_size,
		line_height: font_size + 1.0,
		opacity: state.unhighlighted.then_some(OPACITY_UNHIGHLIGHT),
		margin_top,
		badges,
		content: LabelContent {
			lines,
			visible: hidden || !scale.no_content,
			font_size: content_font,
			attached_to_badges: has_badges && !scale.no_badge,
			box_badge,
		},
		hosts,
	}
}

fn known(value: Option<&String>) -> Option<&str> {
	value.map(String::as_str).filter(|v| !v.is_empty() && *v != UNKNOWN)
}

fn text(value: Option<&String>) -> String {
	value.cloned().unwrap_or_default()
}

/// The node-type specific lines that lead the label.
fn primary_lines(node: &NodeData, ancestry: BoxAncestry, settings: &ViewSettings) -> Vec<String> {
	let app = text(node.app.as_ref());
	let version = known(node.version.as_ref());
	let app_graph = settings.graph_type == GraphType::App;

	match node.node_type {
		NodeType::Aggregate => vec![text(node.aggregate_value.as_ref())],
		NodeType::App if ancestry.is_app_boxed() => {
			// The box already names the app, so prefer what tells members apart.
			let line = match (app_graph, version) {
				(true, _) => app,
				(false, Some(version)) => version.to_string(),
				(false, None) => match node.workload.as_deref() {
					Some(workload) if !workload.is_empty() => workload.to_string(),
					_ => app,
				},
			};
			vec![line]
		}
		NodeType::App => match (app_graph, version) {
			(false, Some(version)) => vec![app, version.to_string()],
			_ => vec![app],
		},
		NodeType::Box => match node.is_box {
			Some(BoxKind::App) => vec![app],
			Some(BoxKind::Cluster) => vec![text(node.cluster.as_ref())],
			Some(BoxKind::Namespace) => vec![text(node.namespace.as_ref())],
			Some(BoxKind::Unrecognized) | None => Vec::new(),
		},
		NodeType::Service => vec![text(node.service.as_ref())],
		NodeType::Unknown => vec![UNKNOWN.to_string()],
		NodeType::Workload => vec![text(node.workload.as_ref())],
		NodeType::Unrecognized => vec!["error".to_string()],
	}
}

/// `(namespace)` and `(cluster)` lines for nodes whose context is not
/// already obvious from the surrounding boxes.
fn qualifier_lines(node: &NodeData, ancestry: BoxAncestry, settings: &ViewSettings) -> Vec<String> {
	let mut lines = Vec::new();

	if let Some(namespace) = known(node.namespace.as_ref())
		&& (settings.is_multi_namespace() || node.is_outside)
		&& !ancestry.is_app_boxed()
		&& !ancestry.is_namespace_boxed()
		&& node.is_box != Some(BoxKind::Namespace)
	{
		lines.push(format!("({namespace})"));
	}

	if let Some(cluster) = known(node.cluster.as_ref())
		&& settings.home_cluster.as_deref() != Some(cluster)
		&& node.parent.is_none()
		&& node.is_box != Some(BoxKind::Cluster)
	{
		lines.push(format!("({cluster})"));
	}

	lines
}

fn box_badge(kind: BoxKind, config: &GraphStyleConfig) -> Option<BoxBadge> {
	let icons = &config.icons;
	match kind {
		BoxKind::App => Some(BoxBadge {
			text: icons.app_badge.clone(),
			font_size: Some(config.fonts.font_label),
		}),
		BoxKind::Cluster => Some(BoxBadge {
			text: icons.cluster_badge.clone(),
			font_size: None,
		}),
		BoxKind::Namespace => Some(BoxBadge {
			text: icons.namespace_badge.clone(),
			font_size: None,
		}),
		BoxKind::Unrecognized => {
			warn!("GraphStyles: unexpected box kind, omitting box badge");
			None
		}
	}
}

/// Hostnames from the virtual service and both gateway sides, truncated to
/// `max_hosts` entries.
fn host_list(node: &NodeData, max_hosts: usize) -> Option<HostList> {
	let hosts: Vec<String> = [
		node.virtual_service_hostnames(),
		node.ingress_hostnames(),
		node.egress_hostnames(),
	]
	.into_iter()
	.flatten()
	.flatten()
	.map(|h| if h == "*" { "* (all hosts)".to_string() } else { h.clone() })
	.collect();

	if hosts.is_empty() {
		return None;
	}

	let mut lines = hosts;
	if lines.len() > max_hosts {
		let more = lines.len() - max_hosts;
		lines.truncate(max_hosts);
		lines.push(if more == 1 {
			"1 more host...".to_string()
		} else {
			format!("{more} more hosts...")
		});
	}
	Some(HostList { lines })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_styles::types::{GatewayInfo, HostInfo};

	fn config() -> GraphStyleConfig {
		GraphStyleConfig::default()
	}

	fn label(node: &NodeData, settings: &ViewSettings) -> NodeLabel {
		compose_node_label(node, BoxAncestry::default(), ElementState::default(), settings, &config())
	}

	fn app_node(app: &str, version: Option<&str>) -> NodeData {
		NodeData {
			node_type: NodeType::App,
			app: Some(app.into()),
			version: version.map(Into::into),
			workload: Some(format!("{app}-wl")),
			namespace: Some("bookinfo".into()),
			..Default::default()
		}
	}

	#[test]
	fn test_workload_label() {
		let node = NodeData {
			node_type: NodeType::Workload,
			workload: Some("reviews-v1".into()),
			..Default::default()
		};
		let label = label(&node, &ViewSettings::default());
		assert_eq!(label.content.lines, vec!["reviews-v1"]);
		assert_eq!(label.variant, LabelVariant::Leaf);
		assert!(!label.hidden);
		assert!(label.badges.is_none());
		assert!(label.hosts.is_none());
		assert_eq!(label.font_size, 13.0);
		assert_eq!(label.line_height, 14.0);
		assert_eq!(label.margin_top, MARGIN_TOP_DEFAULT);
	}

	#[test]
	fn test_unrecognized_type_is_error() {
		let node = NodeData {
			node_type: NodeType::Unrecognized,
			..Default::default()
		};
		assert_eq!(label(&node, &ViewSettings::default()).content.lines, vec!["error"]);
	}

	#[test]
	fn test_unknown_type() {
		let node = NodeData::default();
		assert_eq!(label(&node, &ViewSettings::default()).content.lines, vec!["unknown"]);
	}

	#[test]
	fn test_unboxed_app_versions() {
		let settings = ViewSettings::default();
		assert_eq!(
			label(&app_node("reviews", Some("v2")), &settings).content.lines,
			vec!["reviews", "v2"]
		);
		assert_eq!(
			label(&app_node("reviews", Some("unknown")), &settings).content.lines,
			vec!["reviews"]
		);

		let app_graph = ViewSettings {
			graph_type: GraphType::App,
			..Default::default()
		};
		assert_eq!(
			label(&app_node("reviews", Some("v2")), &app_graph).content.lines,
			vec!["reviews"]
		);
	}

	#[test]
	fn test_app_boxed_app_versions() {
		let ancestry = BoxAncestry {
			parent: Some(BoxKind::App),
			grandparent: None,
		};
		let settings = ViewSettings::default();
		let mut node = app_node("reviews", Some("v2"));
		node.parent = Some("box-reviews".into());
		let compose = |node: &NodeData, settings: &ViewSettings| {
			compose_node_label(node, ancestry, ElementState::default(), settings, &config())
				.content
				.lines
		};
		assert_eq!(compose(&node, &settings), vec!["v2"]);

		node.version = None;
		assert_eq!(compose(&node, &settings), vec!["reviews-wl"]);

		node.workload = None;
		assert_eq!(compose(&node, &settings), vec!["reviews"]);

		let app_graph = ViewSettings {
			graph_type: GraphType::App,
			..Default::default()
		};
		node.version = Some("v2".into());
		assert_eq!(compose(&node, &app_graph), vec!["reviews"]);
	}

	#[test]
	fn test_aggregate_label() {
		let node = NodeData {
			node_type: NodeType::Aggregate,
			aggregate: Some("request_operation".into()),
			aggregate_value: Some("Top".into()),
			namespace: Some("bookinfo".into()),
			is_outside: true,
			..Default::default()
		};
		assert_eq!(
			label(&node, &ViewSettings::default()).content.lines,
			vec!["Top", "(bookinfo)"]
		);
	}

	#[test]
	fn test_namespace_qualifier() {
		let node = NodeData {
			node_type: NodeType::Service,
			service: Some("details".into()),
			namespace: Some("bookinfo".into()),
			..Default::default()
		};
		let single = ViewSettings {
			active_namespaces: vec!["bookinfo".into()],
			..Default::default()
		};
		assert_eq!(label(&node, &single).content.lines, vec!["details"]);

		let multi = ViewSettings {
			active_namespaces: vec!["bookinfo".into(), "istio-system".into()],
			..Default::default()
		};
		assert_eq!(label(&node, &multi).content.lines, vec!["details", "(bookinfo)"]);

		// Already scoped by a namespace box two levels up.
		let boxed = compose_node_label(
			&node,
			BoxAncestry {
				parent: Some(BoxKind::App),
				grandparent: Some(BoxKind::Namespace),
			},
			ElementState::default(),
			&multi,
			&config(),
		);
		assert_eq!(boxed.content.lines, vec!["details"]);

		let mut unknown_ns = node.clone();
		unknown_ns.namespace = Some(UNKNOWN.into());
		assert_eq!(label(&unknown_ns, &multi).content.lines, vec!["details"]);
	}

	#[test]
	fn test_cluster_qualifier() {
		let node = NodeData {
			node_type: NodeType::Workload,
			workload: Some("ratings-v1".into()),
			cluster: Some("east".into()),
			..Default::default()
		};
		let home_west = ViewSettings {
			home_cluster: Some("west".into()),
			..Default::default()
		};
		assert_eq!(label(&node, &home_west).content.lines, vec!["ratings-v1", "(east)"]);

		let home_east = ViewSettings {
			home_cluster: Some("east".into()),
			..Default::default()
		};
		assert_eq!(label(&node, &home_east).content.lines, vec!["ratings-v1"]);

		let mut boxed = node.clone();
		boxed.parent = Some("cluster-box".into());
		assert_eq!(label(&boxed, &home_west).content.lines, vec!["ratings-v1"]);
	}

	#[test]
	fn test_namespace_box() {
		let node = NodeData {
			node_type: NodeType::Box,
			is_box: Some(BoxKind::Namespace),
			namespace: Some("bookinfo".into()),
			cluster: Some("east".into()),
			..Default::default()
		};
		let settings = ViewSettings {
			active_namespaces: vec!["a".into(), "b".into()],
			home_cluster: Some("west".into()),
			..Default::default()
		};
		let label = label(&node, &settings);
		assert_eq!(label.variant, LabelVariant::Box(BoxKind::Namespace));
		assert_eq!(label.content.lines, vec!["bookinfo", "(east)"]);
		assert_eq!(label.margin_top, MARGIN_TOP_OUTER_BOX);
		assert_eq!(
			label.content.box_badge,
			Some(BoxBadge {
				text: "NS".into(),
				font_size: None
			})
		);
		assert!(label.hosts.is_none());
	}

	#[test]
	fn test_app_box_pins_badge_font() {
		let node = NodeData {
			node_type: NodeType::Box,
			is_box: Some(BoxKind::App),
			app: Some("reviews".into()),
			..Default::default()
		};
		let label = label(&node, &ViewSettings::default());
		assert_eq!(label.content.lines, vec!["reviews"]);
		assert_eq!(label.margin_top, MARGIN_TOP_DEFAULT);
		assert_eq!(label.content.box_badge.unwrap().font_size, Some(13.0));
	}

	#[test]
	fn test_unrecognized_box_kind_has_no_badge() {
		let node = NodeData {
			node_type: NodeType::Box,
			is_box: Some(BoxKind::Unrecognized),
			..Default::default()
		};
		let label = label(&node, &ViewSettings::default());
		assert_eq!(label.variant, LabelVariant::Box(BoxKind::Unrecognized));
		assert!(label.content.box_badge.is_none());
		assert!(label.content.lines.is_empty());
	}

	#[test]
	fn test_host_list_truncation() {
		let mut node = NodeData {
			node_type: NodeType::Service,
			service: Some("productpage".into()),
			has_virtual_service: Some(HostInfo {
				hostnames: Some(vec!["a".into(), "b".into(), "*".into()]),
			}),
			is_gateway: Some(GatewayInfo {
				ingress_info: Some(HostInfo {
					hostnames: Some(vec!["c".into()]),
				}),
				egress_info: Some(HostInfo {
					hostnames: Some(vec!["d".into()]),
				}),
			}),
			..Default::default()
		};
		let config = GraphStyleConfig {
			max_hosts: 3,
			..Default::default()
		};
		let compose = |node: &NodeData| {
			compose_node_label(node, BoxAncestry::default(), ElementState::default(), &ViewSettings::default(), &config)
				.hosts
				.unwrap()
				.lines
		};
		assert_eq!(compose(&node), vec!["a", "b", "* (all hosts)", "2 more hosts..."]);

		node.is_gateway = None;
		assert_eq!(compose(&node), vec!["a", "b", "* (all hosts)"]);

		node.has_virtual_service = Some(HostInfo {
			hostnames: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
		});
		assert_eq!(compose(&node), vec!["a", "b", "c", "1 more host..."]);
	}

	#[test]
	fn test_zoom_hides_badges_then_content() {
		let node = NodeData {
			node_type: NodeType::Workload,
			workload: Some("w".into()),
			has_circuit_breaker: true,
			..Default::default()
		};
		let at = |zoom: f64| {
			label(
				&node,
				&ViewSettings {
					zoom,
					..Default::default()
				},
			)
		};

		let near = at(1.0);
		assert!(!near.hidden);
		assert!(near.badges.as_ref().unwrap().visible);
		assert!(near.content.visible);
		assert!(near.content.attached_to_badges);

		let mid = at(0.6);
		assert!(!mid.hidden);
		assert!(mid.badges.as_ref().unwrap().visible);
		assert!(!mid.content.visible);

		let far = at(0.3);
		assert!(far.hidden);
		assert!(!far.content.attached_to_badges);
	}

	#[test]
	fn test_highlight_and_unhighlight() {
		let node = NodeData {
			node_type: NodeType::Box,
			is_box: Some(BoxKind::Cluster),
			cluster: Some("east".into()),
			..Default::default()
		};
		let highlighted = compose_node_label(
			&node,
			BoxAncestry::default(),
			ElementState {
				highlighted: true,
				..Default::default()
			},
			&ViewSettings::default(),
			&config(),
		);
		assert!((highlighted.content.font_size - 13.0 * 1.3).abs() < 1e-9);
		assert!((highlighted.font_size - 13.0 * 1.2).abs() < 1e-9);
		assert_eq!(highlighted.opacity, None);

		let dimmed = compose_node_label(
			&node,
			BoxAncestry::default(),
			ElementState {
				unhighlighted: true,
				..Default::default()
			},
			&ViewSettings::default(),
			&config(),
		);
		assert_eq!(dimmed.opacity, Some(OPACITY_UNHIGHLIGHT));
		assert_eq!(dimmed.content.font_size, 13.0);
	}
}
