//! Command-line entrypoint.
//!
//! Styles a graph snapshot (the renderer's JSON element data) and prints the
//! resulting per-element styles and labels as JSON. Useful for checking a
//! palette or config change without a browser.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

#[cfg(not(target_arch = "wasm32"))]
mod cli {
	use std::fs;
	use std::io::{self, Read};
	use std::path::PathBuf;

	use anyhow::{Context, Result};
	use clap::Parser;
	use log::{LevelFilter, info};
	use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

	use mesh_graph_styles::{GraphSnapshot, GraphStyleConfig, GraphStyles, ViewSettings};

	#[derive(Parser, Debug)]
	#[command(name = "mesh-graph-styles")]
	#[command(about = "Compute node and edge styles for a mesh graph snapshot")]
	struct Cli {
		/// Graph snapshot JSON ({ "nodes": [...], "edges": [...] }). Reads stdin when omitted.
		snapshot: Option<PathBuf>,

		/// Style config JSON (palette, icons, fonts, maxHosts)
		#[arg(short, long)]
		config: Option<PathBuf>,

		/// View settings JSON (zoom, edge labels, toggles, namespaces)
		#[arg(short, long)]
		settings: Option<PathBuf>,

		/// Pretty-print the output
		#[arg(long)]
		pretty: bool,

		/// Log at debug level
		#[arg(short, long)]
		verbose: bool,
	}

	fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
		let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
		serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
	}

	pub fn run() -> Result<()> {
		let cli = Cli::parse();

		let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
		let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

		let config = match &cli.config {
			Some(path) => GraphStyleConfig::from_path(path)?,
			None => GraphStyleConfig::default(),
		};
		let settings: ViewSettings = match &cli.settings {
			Some(path) => read_json(path)?,
			None => ViewSettings::default(),
		};
		let snapshot: GraphSnapshot = match &cli.snapshot {
			Some(path) => read_json(path)?,
			None => {
				let mut text = String::new();
				io::stdin().read_to_string(&mut text).context("reading stdin")?;
				serde_json::from_str(&text).context("parsing snapshot from stdin")?
			}
		};
		info!(
			"styling {} nodes, {} edges",
			snapshot.nodes.len(),
			snapshot.edges.len()
		);

		let styled = GraphStyles::new(config).style_snapshot(&snapshot, &settings);
		let out = if cli.pretty {
			serde_json::to_string_pretty(&styled)?
		} else {
			serde_json::to_string(&styled)?
		};
		println!("{out}");
		Ok(())
	}
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
	cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
	mesh_graph_styles::init_logging();
}
