//! HTML rendering of node labels.
//!
//! Serializes a [`NodeLabel`] into the markup consumed by the renderer's HTML
//! label layer. Colors come from the palette as inline styles; the few rules
//! that need selectors (host list reveal on hover) live in [`LABEL_CSS`],
//! which the host page installs once.

use super::badges::Badge;
use super::config::GraphStyleConfig;
use super::label::{LabelVariant, NodeLabel};

/// Font stack shared by node and edge text. `pficon` supplies the icon glyphs.
pub const LABEL_FONT: &str = "Verdana,Arial,Helvetica,sans-serif,pficon";

/// Static rules for label markup produced by [`render_node_label`].
pub const LABEL_CSS: &str = "\
.mesh-label{border-radius:3px;box-shadow:0 2px 4px 0 rgba(0,0,0,0.2),0 2px 8px 0 rgba(0,0,0,0.19);\
display:inline-flex;font-family:Verdana,Arial,Helvetica,sans-serif,pficon;font-weight:normal;text-align:center}\
.mesh-label-badges{align-items:center;border-top-left-radius:3px;border-bottom-left-radius:3px;display:flex;padding:3px 3px}\
.mesh-label-content{align-items:center;border-radius:3px;border-width:1px;padding:3px 5px}\
.mesh-label-content.with-badges{border-bottom-left-radius:unset;border-top-left-radius:unset;border-style:solid;border-left:0}\
.mesh-label-box-badge{margin-right:5px;min-width:24px;padding-left:0;padding-right:0}\
.mesh-label-hosts{text-align:initial;margin-top:2px;padding-top:2px}\
.with-hosts div:last-child{display:none}\
.with-hosts:hover div:last-child{display:block}";

fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#39;")
}

fn render_badges(badges: &[Badge], visible: bool, config: &GraphStyleConfig) -> String {
	let palette = &config.palette;
	let mut html = format!(
		"<div class=\"mesh-label-badges\" style=\"background-color:{};color:{};{}\">",
		palette.node_badge_background,
		palette.node_badge,
		if visible { "" } else { "display:none;" }
	);
	let last = badges.len().saturating_sub(1);
	for (i, badge) in badges.iter().enumerate() {
		// The rightmost icon hugs the content, the others leave a small gap.
		let mut style = if i == last { "margin-left:1px;" } else { "margin-right:2px;" }.to_string();
		if *badge == Badge::Mirroring {
			style.push_str("margin-top:1px;");
		}
		html.push_str(&format!(
			"<span class=\"{}\" style=\"{style}\"></span> ",
			escape_html(badge.icon_class(&config.icons))
		));
	}
	html.push_str("</div>");
	html
}

/// Render `label` as HTML.
pub fn render_node_label(label: &NodeLabel, config: &GraphStyleConfig) -> String {
	let palette = &config.palette;
	let content = &label.content;

	let mut label_style = format!(
		"font-size:{}px;line-height:{}px;margin-top:{}px;",
		label.font_size, label.line_height, label.margin_top
	);
	if let Some(opacity) = label.opacity {
		label_style.push_str(&format!("opacity:{opacity};"));
	}
	if label.hidden {
		label_style.push_str("display:none;");
	}

	let badges = label
		.badges
		.as_ref()
		.map(|block| render_badges(&block.badges, block.visible, config))
		.unwrap_or_default();

	let mut content_classes = String::from("mesh-label-content");
	if content.attached_to_badges {
		content_classes.push_str(" with-badges");
	}
	let mut content_style = format!(
		"border-color:{};font-size:{}px;",
		palette.node_badge_background, content.font_size
	);
	if !content.visible {
		content_style.push_str("display:none;");
	}
	let text = content
		.lines
		.iter()
		.map(|line| escape_html(line))
		.collect::<Vec<_>>()
		.join("<br/>");

	let mut html = String::new();
	match label.variant {
		LabelVariant::Box(_) => {
			html.push_str(&format!(
				"<div class=\"mesh-label mesh-label-box\" style=\"{label_style}\">{badges}"
			));
			let box_badge = content
				.box_badge
				.as_ref()
				.map(|badge| {
					let font = badge
						.font_size
						.map(|size| format!("font-size:{size}px;"))
						.unwrap_or_default();
					format!(
						"<span class=\"pf-c-badge pf-m-unread mesh-label-box-badge\" style=\"background-color:{};{font}\">{}</span>",
						palette.box_kind_badge,
						escape_html(&badge.text)
					)
				})
				.unwrap_or_default();
			html.push_str(&format!(
				"<span class=\"{content_classes}\" style=\"background-color:{};color:{};{content_style}\">{box_badge}{text}</span>",
				palette.node_text_background_box, palette.node_text_box
			));
		}
		LabelVariant::Leaf => {
			html.push_str(&format!(
				"<div class=\"mesh-label\" style=\"{label_style}\">{badges}"
			));
			let hosts = label
				.hosts
				.as_ref()
				.map(|hosts| {
					let lines = hosts
						.lines
						.iter()
						.map(|host| escape_html(host))
						.collect::<Vec<_>>()
						.join("<br />");
					format!(
						"<div class=\"mesh-label-hosts\" style=\"border-top:1px solid {};\">{lines}</div>",
						palette.host_list_border
					)
				})
				.unwrap_or_default();
			if label.hosts.is_some() {
				content_classes.push_str(" with-hosts");
			}
			html.push_str(&format!(
				"<div class=\"{content_classes}\" style=\"background-color:{};color:{};{content_style}\"><div>{text}</div>{hosts}</div>",
				palette.node_text_background, palette.node_text
			));
		}
	}
	html.push_str("</div>");
	html
}
