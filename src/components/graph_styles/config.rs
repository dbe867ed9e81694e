//! Style configuration: palette, icons, font thresholds and host list length.
//!
//! Built once at startup (defaults or JSON overrides) and passed by reference
//! to everything that derives styles.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scale::FontSettings;
use super::theme::{Icons, Palette};

/// Errors raised while loading a [`GraphStyleConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The config file could not be read.
	#[error("failed to read config {path}: {source}")]
	Io {
		/// File that failed.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// Malformed JSON or a bad color value.
	#[error("failed to parse config: {0}")]
	Parse(#[from] serde_json::Error),

	/// Values that would break zoom thresholds.
	#[error("invalid config: {0}")]
	Invalid(String),
}

/// Result alias for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default number of hostnames listed under a node label.
pub const DEFAULT_MAX_HOSTS: usize = 5;

/// Complete style configuration.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphStyleConfig {
	/// Colors.
	pub palette: Palette,
	/// Badge classes, glyphs and box badge text.
	pub icons: Icons,
	/// Label font size and zoom thresholds.
	pub fonts: FontSettings,
	/// Hostnames listed before the rest are summarized as "N more hosts...".
	pub max_hosts: usize,
}

impl Default for GraphStyleConfig {
	fn default() -> Self {
		Self {
			palette: Palette::default(),
			icons: Icons::default(),
			fonts: FontSettings::default(),
			max_hosts: DEFAULT_MAX_HOSTS,
		}
	}
}

impl GraphStyleConfig {
	/// Parse a JSON config. Missing fields keep their defaults.
	pub fn from_json_str(json: &str) -> ConfigResult<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Read and parse a JSON config file.
	pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_json_str(&json)
	}

	/// Thresholds are ratios over `font_label`, so it must be positive.
	pub fn validate(&self) -> ConfigResult<()> {
		let fonts = &self.fonts;
		if !(fonts.font_label.is_finite() && fonts.font_label > 0.0) {
			return Err(ConfigError::Invalid(format!(
				"fontLabel must be a positive number, got {}",
				fonts.font_label
			)));
		}
		for (name, value) in [
			("minFontBadge", fonts.min_font_badge),
			("minFontLabel", fonts.min_font_label),
		] {
			if !(value.is_finite() && value >= 0.0) {
				return Err(ConfigError::Invalid(format!(
					"{name} must be a non-negative number, got {value}"
				)));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_json_is_default() {
		let config = GraphStyleConfig::from_json_str("{}").unwrap();
		assert_eq!(config, GraphStyleConfig::default());
		assert_eq!(config.max_hosts, 5);
	}

	#[test]
	fn test_partial_override() {
		let json = r#"{ "maxHosts": 2, "fonts": { "fontLabel": 20 } }"#;
		let config = GraphStyleConfig::from_json_str(json).unwrap();
		assert_eq!(config.max_hosts, 2);
		assert_eq!(config.fonts.font_label, 20.0);
		assert_eq!(config.fonts.min_font_label, 10.0);
	}

	#[test]
	fn test_rejects_zero_font() {
		let result = GraphStyleConfig::from_json_str(r#"{ "fonts": { "fontLabel": 0 } }"#);
		assert!(matches!(result, Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn test_rejects_negative_threshold() {
		let result = GraphStyleConfig::from_json_str(r#"{ "fonts": { "minFontBadge": -1 } }"#);
		assert!(matches!(result, Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn test_parse_error() {
		let result = GraphStyleConfig::from_json_str("{ not json");
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_missing_file() {
		let result = GraphStyleConfig::from_path("/definitely/not/here.json");
		assert!(matches!(result, Err(ConfigError::Io { .. })));
	}
}
