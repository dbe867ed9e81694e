//! Graph entity data structures supplied by the graph renderer.
//!
//! Entities are read-only snapshots of decorated node and edge data, produced
//! fresh on every graph refresh. Field names follow the dashboard's camelCase
//! JSON so snapshots can be deserialized as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::Metric;

/// Marker used by the telemetry backend for values it could not resolve.
pub const UNKNOWN: &str = "unknown";

/// Kind of graph node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	/// Requests grouped by a request attribute value.
	Aggregate,
	/// An app, optionally versioned.
	App,
	/// A grouping box.
	Box,
	/// A service.
	Service,
	/// Traffic from an unresolved source.
	#[default]
	Unknown,
	/// A workload.
	Workload,
	/// Any value the backend sent that this crate does not know about.
	#[serde(other)]
	Unrecognized,
}

/// What a box node groups together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
	/// Versions of one app.
	App,
	/// Everything in one cluster.
	Cluster,
	/// Everything in one namespace.
	Namespace,
	/// Unknown box kind.
	#[serde(other)]
	Unrecognized,
}

/// Health of a node or edge as computed by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum HealthStatus {
	/// No problems.
	Healthy,
	/// Error rate above the warning threshold.
	Degraded,
	/// Error rate above the failure threshold.
	Failure,
	/// Not ready or scaled to zero.
	#[serde(rename = "Not Ready")]
	Idle,
	/// No health information, or a status this crate does not know about.
	#[default]
	#[serde(rename = "No health information")]
	#[serde(other)]
	NotAvailable,
}

/// Edge protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
	/// HTTP requests.
	Http,
	/// gRPC requests or messages.
	Grpc,
	/// Raw TCP bytes.
	Tcp,
	/// Missing or unknown protocol; styled like HTTP.
	#[default]
	#[serde(other)]
	Unknown,
}

impl Protocol {
	/// Name shown on verbose edge labels. `None` when the protocol is unknown.
	pub fn name(self) -> Option<&'static str> {
		match self {
			Protocol::Http => Some("http"),
			Protocol::Grpc => Some("grpc"),
			Protocol::Tcp => Some("tcp"),
			Protocol::Unknown => None,
		}
	}
}

/// Granularity of the graph being displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphType {
	/// One node per app, versions collapsed.
	App,
	/// One node per service.
	Service,
	/// One node per app version.
	#[default]
	VersionedApp,
	/// One node per workload.
	Workload,
}

/// Edge label modes, declared in the order their lines appear on an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeLabelMode {
	/// Requests (or bytes, for TCP) per second, plus error rate.
	TrafficRate,
	/// Response time in ms or s.
	ResponseTime,
	/// Bytes per second.
	Throughput,
	/// Share of the source's outbound requests.
	TrafficDistribution,
}

/// Traffic rate selections made in the graph toolbar.
///
/// Only [`TrafficRate::GrpcRequest`] changes labels: gRPC rates read `rps`
/// when it is selected and `mps` (messages) otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrafficRate {
	/// gRPC traffic shown.
	Grpc,
	/// gRPC received messages.
	GrpcReceived,
	/// gRPC requests.
	GrpcRequest,
	/// gRPC sent messages.
	GrpcSent,
	/// gRPC sent and received messages.
	GrpcTotal,
	/// HTTP traffic shown.
	Http,
	/// HTTP requests.
	HttpRequest,
	/// TCP traffic shown.
	Tcp,
	/// TCP received bytes.
	TcpReceived,
	/// TCP sent bytes.
	TcpSent,
	/// TCP sent and received bytes.
	TcpTotal,
}

/// Hostnames attached to a virtual service or gateway listener.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HostInfo {
	/// Hostnames; `*` means every host.
	pub hostnames: Option<Vec<String>>,
}

/// Gateway role of a node. Either side may be absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayInfo {
	/// Hosts accepted when acting as an ingress gateway.
	pub ingress_info: Option<HostInfo>,
	/// Hosts routed when acting as an egress gateway.
	pub egress_info: Option<HostInfo>,
}

impl GatewayInfo {
	fn ingress_hostnames(&self) -> Option<&[String]> {
		self.ingress_info.as_ref()?.hostnames.as_deref()
	}

	fn egress_hostnames(&self) -> Option<&[String]> {
		self.egress_info.as_ref()?.hostnames.as_deref()
	}
}

/// A decorated graph node.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
	/// Unique node id.
	pub id: String,
	/// Id of the enclosing box, if any.
	pub parent: Option<String>,
	/// Node kind.
	pub node_type: NodeType,
	/// Set when this node is itself a box.
	pub is_box: Option<BoxKind>,
	/// Backend health assessment.
	pub health_status: HealthStatus,
	/// Cluster name.
	pub cluster: Option<String>,
	/// Namespace name.
	pub namespace: Option<String>,
	/// App name.
	pub app: Option<String>,
	/// Service name.
	pub service: Option<String>,
	/// App version, `unknown` when unversioned.
	pub version: Option<String>,
	/// Workload name.
	pub workload: Option<String>,
	/// Request attribute name of an aggregate node.
	pub aggregate: Option<String>,
	/// Request attribute value of an aggregate node.
	pub aggregate_value: Option<String>,

	/// Workload runs without a sidecar proxy.
	#[serde(rename = "hasMissingSC")]
	pub has_missing_sidecar: bool,
	/// A circuit breaker is configured for the node.
	#[serde(rename = "hasCB")]
	pub has_circuit_breaker: bool,
	/// Present when a virtual service routes to this node.
	#[serde(rename = "hasVS")]
	pub has_virtual_service: Option<HostInfo>,
	/// Fault injection scenario.
	pub has_fault_injection: bool,
	/// Traffic mirroring scenario.
	pub has_mirroring: bool,
	/// Request routing scenario.
	pub has_request_routing: bool,
	/// Request timeout scenario.
	pub has_request_timeout: bool,
	/// TCP traffic shifting scenario.
	#[serde(rename = "hasTCPTrafficShifting")]
	pub has_tcp_traffic_shifting: bool,
	/// HTTP traffic shifting scenario.
	pub has_traffic_shifting: bool,
	/// Backed by a workload entry rather than a pod.
	pub has_workload_entry: bool,
	/// Gateway listener details.
	pub is_gateway: Option<GatewayInfo>,
	/// No recent traffic.
	pub is_idle: bool,
	/// The user cannot read the node's namespace.
	pub is_inaccessible: bool,
	/// Lives outside the requested namespaces.
	pub is_outside: bool,
	/// Traffic source with no inbound edges.
	pub is_root: bool,
	/// Defined by a service entry.
	pub is_service_entry: bool,
}

impl NodeData {
	/// True when any traffic-management scenario is active on the node's
	/// virtual service.
	pub fn has_scenario(&self) -> bool {
		self.has_fault_injection
			|| self.has_mirroring
			|| self.has_request_routing
			|| self.has_request_timeout
			|| self.has_tcp_traffic_shifting
			|| self.has_traffic_shifting
	}

	/// Ingress gateway hostnames.
	pub fn ingress_hostnames(&self) -> Option<&[String]> {
		self.is_gateway.as_ref()?.ingress_hostnames()
	}

	/// Egress gateway hostnames.
	pub fn egress_hostnames(&self) -> Option<&[String]> {
		self.is_gateway.as_ref()?.egress_hostnames()
	}

	/// Virtual service hostnames.
	pub fn virtual_service_hostnames(&self) -> Option<&[String]> {
		self.has_virtual_service.as_ref()?.hostnames.as_deref()
	}

	/// True for cluster and namespace boxes.
	pub fn is_outer_box(&self) -> bool {
		matches!(self.is_box, Some(kind) if kind != BoxKind::App)
	}
}

/// Response code histogram: status code -> response flag -> share.
pub type Responses = BTreeMap<String, BTreeMap<String, Metric>>;

/// A decorated graph edge.
///
/// Rates are requests (or bytes, for TCP) per second; percentages are 0-100.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeData {
	/// Unique edge id.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Destination node id.
	pub target: String,
	/// Edge protocol.
	pub protocol: Protocol,
	/// Any traffic was observed in the query window.
	pub has_traffic: bool,
	/// Backend health assessment.
	pub health_status: HealthStatus,

	/// HTTP request rate.
	pub http: Metric,
	/// HTTP error percentage.
	pub http_percent_err: Metric,
	/// Share of the source's HTTP requests.
	pub http_percent_req: Metric,
	/// gRPC request or message rate.
	pub grpc: Metric,
	/// gRPC error percentage.
	pub grpc_percent_err: Metric,
	/// Share of the source's gRPC requests.
	pub grpc_percent_req: Metric,
	/// TCP byte rate.
	pub tcp: Metric,
	/// Response time in milliseconds.
	pub response_time: Metric,
	/// Bytes per second.
	pub throughput: Metric,
	/// Share of traffic secured with mTLS, 0-100.
	#[serde(rename = "isMTLS")]
	pub is_mtls: Metric,
	/// Response codes and flags.
	pub responses: Option<Responses>,
}

/// Kinds of the boxes enclosing a node, nearest first.
///
/// Boxes nest at most cluster ⊇ namespace ⊇ app ⊇ leaf, so only the parent
/// and grandparent matter for label qualifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BoxAncestry {
	/// Kind of the enclosing box.
	pub parent: Option<BoxKind>,
	/// Kind of the box enclosing the parent.
	pub grandparent: Option<BoxKind>,
}

impl BoxAncestry {
	/// Resolve the ancestry of `node` using `lookup` to find nodes by id.
	pub fn resolve<'a>(node: &NodeData, lookup: impl Fn(&str) -> Option<&'a NodeData>) -> Self {
		let parent = node.parent.as_deref().and_then(&lookup);
		let grandparent = parent
			.and_then(|p| p.parent.as_deref())
			.and_then(&lookup);
		Self {
			parent: parent.and_then(|p| p.is_box),
			grandparent: grandparent.and_then(|g| g.is_box),
		}
	}

	/// Directly inside an app box.
	pub fn is_app_boxed(&self) -> bool {
		self.parent == Some(BoxKind::App)
	}

	/// Inside a namespace box, directly or through an app box.
	pub fn is_namespace_boxed(&self) -> bool {
		self.parent == Some(BoxKind::Namespace) || self.grandparent == Some(BoxKind::Namespace)
	}
}

/// Interaction classes currently applied to an element by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementState {
	/// Part of the current hover or selection highlight.
	pub highlighted: bool,
	/// Under the pointer.
	pub hovered: bool,
	/// Selected by the user.
	pub selected: bool,
	/// Faded because something else is highlighted.
	pub unhighlighted: bool,
	/// Matched by the graph find expression.
	pub find: bool,
	/// Part of a selected trace span.
	pub span: bool,
}

/// Display settings shared by every element during one style pass.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewSettings {
	/// Current renderer zoom factor.
	pub zoom: f64,
	/// Show labels regardless of zoom.
	pub force_labels: bool,
	/// Active edge label modes.
	pub edge_labels: Vec<EdgeLabelMode>,
	/// Traffic rate toolbar selections.
	pub traffic_rates: Vec<TrafficRate>,
	/// Graph granularity.
	pub graph_type: GraphType,
	/// Show the missing sidecar badge.
	pub show_missing_sidecars: bool,
	/// Show virtual service, scenario, circuit breaker and gateway badges.
	pub show_virtual_services: bool,
	/// Show the mTLS lock on edges.
	pub show_security: bool,
	/// Namespaces selected in the toolbar.
	pub active_namespaces: Vec<String>,
	/// Cluster the dashboard runs in; its name is never shown as a qualifier.
	pub home_cluster: Option<String>,
}

impl Default for ViewSettings {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			force_labels: false,
			edge_labels: Vec::new(),
			traffic_rates: vec![
				TrafficRate::Grpc,
				TrafficRate::GrpcRequest,
				TrafficRate::Http,
				TrafficRate::HttpRequest,
				TrafficRate::Tcp,
				TrafficRate::TcpSent,
			],
			graph_type: GraphType::default(),
			show_missing_sidecars: true,
			show_virtual_services: true,
			show_security: false,
			active_namespaces: Vec::new(),
			home_cluster: None,
		}
	}
}

impl ViewSettings {
	/// Whether `mode` is active.
	pub fn has_edge_label(&self, mode: EdgeLabelMode) -> bool {
		self.edge_labels.contains(&mode)
	}

	/// Number of distinct edge label modes selected.
	pub fn edge_label_count(&self) -> usize {
		let mut modes = self.edge_labels.clone();
		modes.sort();
		modes.dedup();
		modes.len()
	}

	/// More than one namespace is displayed.
	pub fn is_multi_namespace(&self) -> bool {
		self.active_namespaces.len() > 1
	}
}

/// A complete graph snapshot: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GraphSnapshot {
	/// All nodes, boxes included.
	#[serde(default)]
	pub nodes: Vec<NodeData>,
	/// All edges.
	#[serde(default)]
	pub edges: Vec<EdgeData>,
}

impl GraphSnapshot {
	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&NodeData> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Destination node of `edge`.
	pub fn target(&self, edge: &EdgeData) -> Option<&NodeData> {
		self.node(&edge.target)
	}

	/// Ancestry of `node` within this snapshot.
	pub fn ancestry(&self, node: &NodeData) -> BoxAncestry {
		BoxAncestry::resolve(node, |id| self.node(id))
	}
}
