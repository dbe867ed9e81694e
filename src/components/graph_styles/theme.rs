//! Visual theming for the mesh graph.
//!
//! Provides the color palette and icon tokens. Both are immutable values built
//! once at startup and passed by reference to every resolver.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parse `#rrggbb` or `#rgb`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
		let channel = |s: &str| u8::from_str_radix(s, 16).ok();
		match digits.len() {
			6 => Some(Self::rgb(
				channel(&digits[0..2])?,
				channel(&digits[2..4])?,
				channel(&digits[4..6])?,
			)),
			3 => {
				let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
				Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
			}
			_ => None,
		}
	}

	/// CSS hex for opaque colors, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}

impl Serialize for Color {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_css())
	}
}

impl<'de> Deserialize<'de> for Color {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Color::from_hex(&s)
			.ok_or_else(|| serde::de::Error::custom(format!("invalid color '{s}', expected #rrggbb")))
	}
}

/// PatternFly base colors the palette draws from.
pub(crate) mod pf {
	use super::Color;

	pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
	pub const BLACK_100: Color = Color::rgb(0xfa, 0xfa, 0xfa);
	pub const BLACK_300: Color = Color::rgb(0xd2, 0xd2, 0xd2);
	pub const BLACK_500: Color = Color::rgb(0x8a, 0x8d, 0x90);
	pub const BLACK_600: Color = Color::rgb(0x6a, 0x6e, 0x73);
	pub const BLACK_700: Color = Color::rgb(0x4f, 0x52, 0x55);
	pub const BLACK_1000: Color = Color::rgb(0x03, 0x03, 0x03);
	pub const BLUE_50: Color = Color::rgb(0xe7, 0xf1, 0xfa);
	pub const BLUE_300: Color = Color::rgb(0x2b, 0x9a, 0xf3);
	pub const BLUE_600: Color = Color::rgb(0x00, 0x29, 0x52);
	pub const GOLD_400: Color = Color::rgb(0xf0, 0xab, 0x00);
	pub const PURPLE_200: Color = Color::rgb(0xa1, 0x8f, 0xff);
	pub const PURPLE_500: Color = Color::rgb(0x40, 0x19, 0x9a);
	pub const SUCCESS: Color = Color::rgb(0x3e, 0x86, 0x35);
	pub const WARNING: Color = Color::rgb(0xf0, 0xab, 0x00);
	pub const DANGER: Color = Color::rgb(0xc9, 0x19, 0x0b);
	pub const BADGE: Color = Color::rgb(0x8a, 0x8d, 0x90);
}

/// Every color the stylesheet uses.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
	/// Healthy edge with traffic.
	pub edge: Color,
	/// Edge without traffic.
	pub edge_dead: Color,
	/// Degraded edge.
	pub edge_degraded: Color,
	/// Failing edge.
	pub edge_failure: Color,
	/// TCP edge with traffic; TCP has no health.
	pub edge_tcp_with_traffic: Color,
	/// Halo behind edge label text.
	pub edge_text_outline: Color,

	/// Resting node border.
	pub node_border: Color,
	/// Cluster and namespace box border.
	pub node_border_box: Color,
	/// Border of degraded nodes, in any state.
	pub node_border_degraded: Color,
	/// Border of failing nodes, in any state.
	pub node_border_failure: Color,
	/// Border of highlighted nodes.
	pub node_border_hover: Color,
	/// Border of selected nodes.
	pub node_border_selected: Color,
	/// Resting fill of leaves.
	pub node_fill: Color,
	/// App box fill.
	pub node_fill_box_app: Color,
	/// Cluster box fill.
	pub node_fill_box_cluster: Color,
	/// Namespace box fill.
	pub node_fill_box_namespace: Color,
	/// Fill of highlighted leaves.
	pub node_fill_hover: Color,
	/// Fill of highlighted degraded leaves.
	pub node_fill_hover_degraded: Color,
	/// Fill of highlighted failing leaves.
	pub node_fill_hover_failure: Color,

	/// Leaf label text.
	pub node_text: Color,
	/// Box label text.
	pub node_text_box: Color,
	/// Leaf label background.
	pub node_text_background: Color,
	/// Box label background.
	pub node_text_background_box: Color,
	/// Badge block background, also the label border.
	pub node_badge_background: Color,
	/// Badge icon color.
	pub node_badge: Color,
	/// Background of the `A`/`C`/`NS` box badge.
	pub box_kind_badge: Color,
	/// Separator above the host list.
	pub host_list_border: Color,

	/// Overlay on nodes matched by find.
	pub overlay_find: Color,
	/// Overlay on nodes in a selected trace span.
	pub overlay_span: Color,
}

impl Palette {
	/// PatternFly palette used by the dashboard (default).
	pub fn patternfly() -> Self {
		Self {
			edge: pf::SUCCESS,
			edge_dead: pf::BLACK_500,
			edge_degraded: pf::WARNING,
			edge_failure: pf::DANGER,
			edge_tcp_with_traffic: pf::BLUE_600,
			edge_text_outline: pf::WHITE,

			node_border: pf::BLACK_500,
			node_border_box: pf::BLACK_600,
			node_border_degraded: pf::WARNING,
			node_border_failure: pf::DANGER,
			node_border_hover: pf::BLUE_300,
			node_border_selected: pf::BLUE_300,
			node_fill: pf::WHITE,
			node_fill_box_app: pf::WHITE,
			node_fill_box_cluster: pf::BLACK_300,
			node_fill_box_namespace: pf::BLACK_100,
			node_fill_hover: pf::BLUE_50,
			// Roughly an orange-50 and a red-50.
			node_fill_hover_degraded: Color::rgb(0xfd, 0xf2, 0xe5),
			node_fill_hover_failure: Color::rgb(0xff, 0xe6, 0xe6),

			node_text: pf::BLACK_1000,
			node_text_box: pf::WHITE,
			node_text_background: pf::WHITE,
			node_text_background_box: pf::BLACK_700,
			node_badge_background: pf::PURPLE_500,
			node_badge: pf::WHITE,
			box_kind_badge: pf::BADGE,
			host_list_border: pf::BLACK_600,

			overlay_find: pf::GOLD_400,
			overlay_span: pf::PURPLE_200,
		}
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::patternfly()
	}
}

/// Icon tokens. `*_class` values are CSS classes for HTML badges, `*_glyph`
/// values are plain-text glyphs usable inside canvas-drawn edge labels.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Icons {
	/// Circuit breaker badge.
	pub circuit_breaker_class: String,
	/// Marks an edge into a tripped circuit breaker.
	pub circuit_breaker_glyph: String,
	/// Fault injection badge.
	pub fault_injection_class: String,
	/// Gateway badge.
	pub gateway_class: String,
	/// Mirroring badge.
	pub mirroring_class: String,
	/// Missing sidecar badge.
	pub missing_sidecar_class: String,
	/// Marks an edge carrying mTLS traffic.
	pub mtls_glyph: String,
	/// Request routing badge.
	pub request_routing_class: String,
	/// Request timeout badge.
	pub request_timeout_class: String,
	/// Root (traffic source) badge.
	pub root_class: String,
	/// Traffic shifting badge, HTTP or TCP.
	pub traffic_shifting_class: String,
	/// Virtual service badge.
	pub virtual_service_class: String,
	/// Workload entry badge.
	pub workload_entry_class: String,

	/// App box badge text. Box badges are short text shown inside box labels.
	pub app_badge: String,
	/// Cluster box badge text.
	pub cluster_badge: String,
	/// Namespace box badge text.
	pub namespace_badge: String,
}

impl Default for Icons {
	fn default() -> Self {
		Self {
			circuit_breaker_class: "fa fa-bolt".into(),
			circuit_breaker_glyph: "\u{26a1}".into(),
			fault_injection_class: "fa fa-ban".into(),
			gateway_class: "fa fa-globe".into(),
			mirroring_class: "pf-icon pf-icon-migration".into(),
			missing_sidecar_class: "pf-icon pf-icon-blueprint".into(),
			mtls_glyph: "\u{1f512}".into(),
			request_routing_class: "fa fa-code-branch".into(),
			request_timeout_class: "fa fa-clock-o".into(),
			root_class: "fa fa-arrow-circle-right".into(),
			traffic_shifting_class: "fa fa-share-alt".into(),
			virtual_service_class: "fa fa-code-branch".into(),
			workload_entry_class: "pf-icon pf-icon-virtual-machine".into(),
			app_badge: "A".into(),
			cluster_badge: "C".into(),
			namespace_badge: "NS".into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hex_round_trip() {
		let c = Color::from_hex("#3e8635").unwrap();
		assert_eq!(c, pf::SUCCESS);
		assert_eq!(c.to_css(), "#3e8635");
		assert_eq!(Color::from_hex("#fff"), Some(pf::WHITE));
		assert_eq!(Color::from_hex("3e8635"), None);
		assert_eq!(Color::from_hex("#zzzzzz"), None);
	}

	#[test]
	fn test_alpha_css() {
		assert_eq!(Color::rgba(0, 0, 0, 0.2).to_css(), "rgba(0, 0, 0, 0.2)");
	}

	#[test]
	fn test_partial_palette_override() {
		let palette: Palette = serde_json::from_str(r##"{ "edgeDead": "#000000" }"##).unwrap();
		assert_eq!(palette.edge_dead, Color::rgb(0, 0, 0));
		assert_eq!(palette.edge, pf::SUCCESS);
	}

	#[test]
	fn test_invalid_color_is_rejected() {
		let result: Result<Palette, _> = serde_json::from_str(r#"{ "edge": "green" }"#);
		assert!(result.is_err());
	}
}
