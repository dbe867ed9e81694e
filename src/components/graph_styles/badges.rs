//! Node badge composition.
//!
//! Badges are emitted one at a time and each new badge is placed in front of
//! the ones already emitted, so the first emitted (missing sidecar) ends up
//! rightmost and the last emitted (root/gateway) leftmost.

use std::collections::VecDeque;

use serde::Serialize;

use super::theme::Icons;
use super::types::NodeData;

/// A single icon shown in a node's badge block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
	/// Workload runs without a sidecar.
	MissingSidecar,
	/// Circuit breaker configured.
	CircuitBreaker,
	/// Virtual service with no scenario.
	VirtualService,
	/// Fault injection. Scenario badges replace the virtual service badge.
	FaultInjection,
	/// Traffic mirroring.
	Mirroring,
	/// HTTP or TCP traffic shifting.
	TrafficShifting,
	/// Request timeout.
	RequestTimeout,
	/// Request routing.
	RequestRouting,
	/// Backed by a workload entry.
	WorkloadEntry,
	/// Ingress gateway on a root node, egress gateway otherwise.
	Gateway,
	/// Traffic source.
	Root,
}

impl Badge {
	/// CSS icon class for this badge.
	pub fn icon_class(self, icons: &Icons) -> &str {
		match self {
			Badge::MissingSidecar => &icons.missing_sidecar_class,
			Badge::CircuitBreaker => &icons.circuit_breaker_class,
			Badge::VirtualService => &icons.virtual_service_class,
			Badge::FaultInjection => &icons.fault_injection_class,
			Badge::Mirroring => &icons.mirroring_class,
			Badge::TrafficShifting => &icons.traffic_shifting_class,
			Badge::RequestTimeout => &icons.request_timeout_class,
			Badge::RequestRouting => &icons.request_routing_class,
			Badge::WorkloadEntry => &icons.workload_entry_class,
			Badge::Gateway => &icons.gateway_class,
			Badge::Root => &icons.root_class,
		}
	}
}

/// Which badge groups are enabled in the graph display options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BadgeToggles {
	/// Missing sidecar badge.
	pub show_missing_sidecars: bool,
	/// Also covers circuit breakers, gateways, roots and workload entries.
	pub show_virtual_services: bool,
}

/// Compose the badges for `node`, in left-to-right display order.
pub fn compose_badges(node: &NodeData, toggles: BadgeToggles) -> Vec<Badge> {
	let mut badges = VecDeque::new();

	if toggles.show_missing_sidecars && node.has_missing_sidecar {
		badges.push_front(Badge::MissingSidecar);
	}

	if toggles.show_virtual_services {
		if node.has_circuit_breaker {
			badges.push_front(Badge::CircuitBreaker);
		}

		// A routing scenario implies a virtual service, so its icons stand in
		// for the plain VS badge.
		if node.has_virtual_service.is_some() {
			if !node.has_scenario() {
				badges.push_front(Badge::VirtualService);
			} else {
				if node.has_fault_injection {
					badges.push_front(Badge::FaultInjection);
				}
				if node.has_mirroring {
					badges.push_front(Badge::Mirroring);
				}
				if node.has_traffic_shifting || node.has_tcp_traffic_shifting {
					badges.push_front(Badge::TrafficShifting);
				}
				if node.has_request_timeout {
					badges.push_front(Badge::RequestTimeout);
				}
				if node.has_request_routing {
					badges.push_front(Badge::RequestRouting);
				}
			}
		}

		if node.has_workload_entry {
			badges.push_front(Badge::WorkloadEntry);
		}

		if node.is_root {
			if node.ingress_hostnames().is_some() {
				badges.push_front(Badge::Gateway);
			}
			badges.push_front(Badge::Root);
		} else if node.egress_hostnames().is_some() {
			badges.push_front(Badge::Gateway);
		}
	}

	badges.into()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_styles::types::{GatewayInfo, HostInfo};

	const ALL: BadgeToggles = BadgeToggles {
		show_missing_sidecars: true,
		show_virtual_services: true,
	};

	fn hosts(names: &[&str]) -> Option<HostInfo> {
		Some(HostInfo {
			hostnames: Some(names.iter().map(|s| s.to_string()).collect()),
		})
	}

	#[test]
	fn test_no_flags_no_badges() {
		assert!(compose_badges(&NodeData::default(), ALL).is_empty());
	}

	#[test]
	fn test_missing_sidecar_is_rightmost() {
		let node = NodeData {
			has_missing_sidecar: true,
			has_circuit_breaker: true,
			..Default::default()
		};
		assert_eq!(
			compose_badges(&node, ALL),
			vec![Badge::CircuitBreaker, Badge::MissingSidecar]
		);
	}

	#[test]
	fn test_plain_virtual_service() {
		let node = NodeData {
			has_virtual_service: hosts(&["reviews"]),
			..Default::default()
		};
		assert_eq!(compose_badges(&node, ALL), vec![Badge::VirtualService]);
	}

	#[test]
	fn test_scenarios_replace_virtual_service() {
		let node = NodeData {
			has_virtual_service: hosts(&[]),
			has_fault_injection: true,
			has_mirroring: true,
			has_tcp_traffic_shifting: true,
			has_request_timeout: true,
			has_request_routing: true,
			..Default::default()
		};
		assert_eq!(
			compose_badges(&node, ALL),
			vec![
				Badge::RequestRouting,
				Badge::RequestTimeout,
				Badge::TrafficShifting,
				Badge::Mirroring,
				Badge::FaultInjection,
			]
		);
	}

	#[test]
	fn test_scenarios_need_a_virtual_service() {
		let node = NodeData {
			has_fault_injection: true,
			..Default::default()
		};
		assert!(compose_badges(&node, ALL).is_empty());
	}

	#[test]
	fn test_http_and_tcp_shifting_share_one_badge() {
		let node = NodeData {
			has_virtual_service: hosts(&[]),
			has_traffic_shifting: true,
			has_tcp_traffic_shifting: true,
			..Default::default()
		};
		assert_eq!(compose_badges(&node, ALL), vec![Badge::TrafficShifting]);
	}

	#[test]
	fn test_root_gateway_uses_ingress() {
		let ingress = NodeData {
			is_root: true,
			is_gateway: Some(GatewayInfo {
				ingress_info: hosts(&["*"]),
				egress_info: None,
			}),
			has_workload_entry: true,
			..Default::default()
		};
		assert_eq!(
			compose_badges(&ingress, ALL),
			vec![Badge::Root, Badge::Gateway, Badge::WorkloadEntry]
		);

		let egress_only_root = NodeData {
			is_root: true,
			is_gateway: Some(GatewayInfo {
				ingress_info: None,
				egress_info: hosts(&["example.com"]),
			}),
			..Default::default()
		};
		assert_eq!(compose_badges(&egress_only_root, ALL), vec![Badge::Root]);
	}

	#[test]
	fn test_non_root_gateway_uses_egress() {
		let node = NodeData {
			is_gateway: Some(GatewayInfo {
				ingress_info: hosts(&["a"]),
				egress_info: hosts(&[]),
			}),
			..Default::default()
		};
		assert_eq!(compose_badges(&node, ALL), vec![Badge::Gateway]);
	}

	#[test]
	fn test_toggles() {
		let node = NodeData {
			has_missing_sidecar: true,
			has_circuit_breaker: true,
			is_root: true,
			..Default::default()
		};
		let sidecars_only = BadgeToggles {
			show_missing_sidecars: true,
			show_virtual_services: false,
		};
		assert_eq!(compose_badges(&node, sidecars_only), vec![Badge::MissingSidecar]);

		let vs_only = BadgeToggles {
			show_missing_sidecars: false,
			show_virtual_services: true,
		};
		assert_eq!(
			compose_badges(&node, vs_only),
			vec![Badge::Root, Badge::CircuitBreaker]
		);
	}

	#[test]
	fn test_icon_classes() {
		let icons = Icons::default();
		assert_eq!(Badge::CircuitBreaker.icon_class(&icons), "fa fa-bolt");
		assert_eq!(Badge::Root.icon_class(&icons), "fa fa-arrow-circle-right");
	}
}
