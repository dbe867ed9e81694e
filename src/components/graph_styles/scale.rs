//! Zoom-dependent label visibility and font sizing.
//!
//! Labels are sized in screen pixels, so as the graph zooms out the rendered
//! font shrinks with zoom level `k`. Below a minimum readable size the
//! renderer hides parts of the label:
//!
//! - Badges disappear once `font_label * k` drops under `min_font_badge`.
//! - Label text disappears once `font_label * k` drops under `min_font_label`.
//!
//! "Force labels" overrides both thresholds for node labels. Edge labels only
//! honor the text threshold.

use serde::{Deserialize, Serialize};

/// Label font ratio applied to highlighted leaves and app boxes.
pub const FONT_SIZE_RATIO_HOVER: f64 = 1.2;
/// Label font ratio applied to highlighted cluster and namespace boxes.
pub const FONT_SIZE_RATIO_HOVER_BOX: f64 = 1.3;
/// Edge text is drawn smaller than node text.
pub const FONT_SIZE_RATIO_EDGE_TEXT: f64 = 0.8;

/// Font sizes in screen pixels.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSettings {
	/// Base label font size.
	pub font_label: f64,
	/// Smallest on-screen size at which badges are still drawn.
	pub min_font_badge: f64,
	/// Smallest on-screen size at which label text is still drawn.
	pub min_font_label: f64,
}

impl Default for FontSettings {
	fn default() -> Self {
		Self {
			font_label: 13.0,
			min_font_badge: 7.0,
			min_font_label: 10.0,
		}
	}
}

impl FontSettings {
	/// Zoom level under which badges are hidden.
	pub fn badge_zoom_threshold(&self) -> f64 {
		self.min_font_badge / self.font_label
	}

	/// Zoom level under which label text is hidden.
	pub fn label_zoom_threshold(&self) -> f64 {
		self.min_font_label / self.font_label
	}

	/// Edge label font size; highlighted edges use the full label size.
	pub fn edge_font_size(&self, highlighted: bool) -> f64 {
		if highlighted {
			self.font_label
		} else {
			self.font_label * FONT_SIZE_RATIO_EDGE_TEXT
		}
	}
}

/// Pre-computed label visibility for a specific zoom level.
///
/// Create this once per style pass and share it across elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelScale {
	/// Badges are too small to draw.
	pub no_badge: bool,
	/// Label text is too small to draw.
	pub no_content: bool,
}

impl LabelScale {
	/// Visibility at zoom level `k`.
	pub fn new(fonts: &FontSettings, k: f64, force_labels: bool) -> Self {
		Self {
			no_badge: !force_labels && k < fonts.badge_zoom_threshold(),
			no_content: !force_labels && k < fonts.label_zoom_threshold(),
		}
	}

	/// Whether an element with or without badges shows any label at all.
	pub fn hides_label(&self, has_badges: bool) -> bool {
		self.no_content && (self.no_badge || !has_badges)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_thresholds_follow_font_ratio() {
		let fonts = FontSettings::default();
		assert!((fonts.badge_zoom_threshold() - 7.0 / 13.0).abs() < 1e-12);
		assert!((fonts.label_zoom_threshold() - 10.0 / 13.0).abs() < 1e-12);
	}

	#[test]
	fn test_visibility_by_zoom() {
		let fonts = FontSettings::default();

		let full = LabelScale::new(&fonts, 1.0, false);
		assert!(!full.no_badge && !full.no_content);

		// Between 7/13 and 10/13: badges still fit, text does not.
		let mid = LabelScale::new(&fonts, 0.6, false);
		assert!(!mid.no_badge && mid.no_content);
		assert!(!mid.hides_label(true));
		assert!(mid.hides_label(false));

		let far = LabelScale::new(&fonts, 0.3, false);
		assert!(far.no_badge && far.no_content);
		assert!(far.hides_label(true));
	}

	#[test]
	fn test_force_labels_overrides_zoom() {
		let scale = LabelScale::new(&FontSettings::default(), 0.1, true);
		assert!(!scale.no_badge && !scale.no_content);
		assert!(!scale.hides_label(false));
	}

	#[test]
	fn test_edge_font_size() {
		let fonts = FontSettings::default();
		assert!((fonts.edge_font_size(false) - 10.4).abs() < 1e-9);
		assert_eq!(fonts.edge_font_size(true), 13.0);
	}
}
