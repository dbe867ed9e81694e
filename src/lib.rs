//! mesh-graph-styles: style, badge and label derivation for service-mesh
//! topology graphs.
//!
//! This crate computes the visual attributes and labels a graph renderer needs
//! for each node and edge of a mesh graph. It is pure and stateless; the
//! renderer calls it once per element on every style pass. On wasm32 the same
//! hooks are exported to JavaScript through `wasm-bindgen`.

// clap, simplelog and anyhow are only used by the CLI binary.
#![cfg_attr(not(target_arch = "wasm32"), allow(unused_crate_dependencies))]

pub mod components;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use components::graph_styles::{
	BoxAncestry, ConfigError, EdgeData, ElementState, GraphSnapshot, GraphStyleConfig, GraphStyles,
	NodeData, NodeLabel, ViewSettings,
};

/// Initialize logging and panic hooks for the WASM target.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
	let _ = console_log::init_with_level(log::Level::Debug);
	console_error_panic_hook::set_once();
	log::info!("mesh-graph-styles: logging initialized");
}
