//! Style and label derivation for the mesh topology graph.
//!
//! Computes everything the graph renderer draws for an element from the
//! element's decorated data and the current view settings:
//! - Node and edge colors, shapes, borders and opacity
//! - Node badges (sidecars, circuit breakers, routing scenarios, gateways)
//! - Node labels with namespace/cluster qualifiers and host lists
//! - Edge labels with rate, latency, throughput and distribution metrics
//!
//! All derivation is pure: the same entity and settings always produce the
//! same output, and nothing is retained between calls.
//!
//! # Example
//!
//! ```ignore
//! use mesh_graph_styles::{GraphStyles, GraphStyleConfig, NodeData, ViewSettings};
//!
//! let styles = GraphStyles::new(GraphStyleConfig::default());
//! let node: NodeData = serde_json::from_str(json)?;
//! let html = styles.node_label_html(&node, ancestry, state, &ViewSettings::default());
//! ```

pub mod badges;
pub mod config;
pub mod edge_label;
pub mod format;
pub mod label;
pub mod render;
pub mod scale;
pub mod style;
mod stylesheet;
pub mod theme;
mod types;

pub use badges::{Badge, BadgeToggles};
pub use config::{ConfigError, GraphStyleConfig};
pub use format::Metric;
pub use label::NodeLabel;
pub use stylesheet::{GraphStyles, StyledEdge, StyledGraph, StyledNode};
pub use theme::{Color, Icons, Palette};
pub use types::{
	BoxAncestry, BoxKind, EdgeData, EdgeLabelMode, ElementState, GatewayInfo, GraphSnapshot,
	GraphType, HealthStatus, HostInfo, NodeData, NodeType, Protocol, Responses, TrafficRate,
	UNKNOWN, ViewSettings,
};
