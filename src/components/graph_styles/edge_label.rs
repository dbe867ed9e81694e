//! Edge label composition.
//!
//! Each active [`EdgeLabelMode`] contributes at most one line, in declaration
//! order. Protocol, mTLS lock and circuit-breaker markers are then prepended.

use super::config::GraphStyleConfig;
use super::format::{format_byte_rate, format_duration, format_error_rate, format_percent, format_rate};
use super::types::{EdgeData, EdgeLabelMode, Protocol, Responses, TrafficRate, ViewSettings};

/// Envoy response flags that indicate an open circuit breaker.
///
/// `UO` is set when the breaker is caught open. When an open breaker has
/// already removed every destination, Envoy reports `UH` (no healthy upstream)
/// instead, so both are treated as a tripped breaker.
const CIRCUIT_BREAKER_FLAGS: [&str; 2] = ["UO", "UH"];

/// Compose the text label for `edge`. Returns an empty string when the label
/// is too small to read at the current zoom.
///
/// `dest_has_circuit_breaker` is the destination node's `hasCB` flag; the
/// circuit-breaker marker is only shown for edges into such nodes.
pub fn compose_edge_label(
	edge: &EdgeData,
	dest_has_circuit_breaker: bool,
	settings: &ViewSettings,
	config: &GraphStyleConfig,
	verbose: bool,
) -> String {
	if settings.zoom < config.fonts.label_zoom_threshold() {
		return String::new();
	}

	let include_units = verbose || settings.edge_label_count() > 1;
	let mut lines = Vec::new();

	if settings.has_edge_label(EdgeLabelMode::TrafficRate)
		&& let Some(line) = traffic_rate_line(edge, settings, include_units)
	{
		lines.push(line);
	}

	if settings.has_edge_label(EdgeLabelMode::ResponseTime) && edge.response_time.value() > 0.0 {
		lines.push(format_duration(&edge.response_time));
	}

	if settings.has_edge_label(EdgeLabelMode::Throughput) && edge.throughput.value() > 0.0 {
		lines.push(format_byte_rate(&edge.throughput, include_units));
	}

	if settings.has_edge_label(EdgeLabelMode::TrafficDistribution) {
		let http = edge.http_percent_req.value();
		let share = if http > 0.0 { http } else { edge.grpc_percent_req.value() };
		if share > 0.0 && share < 100.0 {
			lines.push(format_percent(share));
		}
	}

	let mut label = lines.join("\n");

	if verbose && let Some(protocol) = edge.protocol.name() {
		label = format!("{protocol}\n{label}");
	}

	let icons = &config.icons;
	let mut lock = false;
	if settings.show_security && edge.has_traffic && edge.is_mtls.value() > 0.0 {
		lock = true;
		label = format!("{}\n{label}", icons.mtls_glyph);
	}

	if edge.has_traffic
		&& dest_has_circuit_breaker
		&& edge.responses.as_ref().is_some_and(circuit_breaker_tripped)
	{
		let separator = if lock { " " } else { "\n" };
		label = format!("{}{separator}{label}", icons.circuit_breaker_glyph);
	}

	label
}

fn traffic_rate_line(edge: &EdgeData, settings: &ViewSettings, include_units: bool) -> Option<String> {
	let (http, grpc, tcp) = (edge.http.value(), edge.grpc.value(), edge.tcp.value());
	let (rate, percent_err) = if http > 0.0 {
		(http, edge.http_percent_err.value())
	} else if grpc > 0.0 {
		(grpc, edge.grpc_percent_err.value())
	} else if tcp > 0.0 {
		(tcp, 0.0)
	} else {
		return None;
	};

	if percent_err > 0.0 {
		return Some(format!(
			"{}\n{}",
			format_rate(rate, include_units, None),
			format_error_rate(percent_err)
		));
	}

	Some(match edge.protocol {
		Protocol::Grpc if settings.traffic_rates.contains(&TrafficRate::GrpcRequest) => {
			format_rate(rate, include_units, None)
		}
		Protocol::Grpc => format_rate(rate, include_units, Some("mps")),
		Protocol::Tcp => format_byte_rate(rate, include_units),
		Protocol::Http | Protocol::Unknown => format_rate(rate, include_units, None),
	})
}

fn circuit_breaker_tripped(responses: &Responses) -> bool {
	responses.values().any(|flags| {
		CIRCUIT_BREAKER_FLAGS
			.iter()
			.any(|flag| flags.get(*flag).is_some_and(|count| count.is_set()))
	})
}
