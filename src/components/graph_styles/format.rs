//! Numeric display formatting for edge labels.
//!
//! Every formatter accepts anything convertible into a [`Metric`] and never
//! panics. Telemetry occasionally delivers numbers as strings, nulls or
//! booleans; those are coerced and logged, and anything unparsable renders as
//! `NaN`.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A telemetry value that should be a number but may arrive as anything.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Metric {
	/// A proper number.
	Number(f64),
	/// A numeric string, or garbage.
	Text(String),
	/// Any other JSON value: null, boolean, array or object.
	Other(Value),
}

impl Default for Metric {
	fn default() -> Self {
		Metric::Number(0.0)
	}
}

impl From<f64> for Metric {
	fn from(n: f64) -> Self {
		Metric::Number(n)
	}
}

impl From<i32> for Metric {
	fn from(n: i32) -> Self {
		Metric::Number(n as f64)
	}
}

impl From<&str> for Metric {
	fn from(s: &str) -> Self {
		Metric::Text(s.to_string())
	}
}

impl From<&Metric> for Metric {
	fn from(m: &Metric) -> Self {
		m.clone()
	}
}

impl Metric {
	/// Numeric value, coercing the way a JS `Number(...)` call would:
	/// `null` is 0, booleans are 0 or 1, arrays and objects are NaN.
	///
	/// Anything but a number here means an upstream conversion defect, so it
	/// is logged.
	pub fn value(&self) -> f64 {
		match self {
			Metric::Number(n) => *n,
			Metric::Text(s) => {
				warn!("Expected number but received string: |{s}|");
				parse_number(s)
			}
			Metric::Other(v) => {
				warn!("Expected number but received: |{v}|");
				match v {
					Value::Null => 0.0,
					Value::Bool(b) => f64::from(u8::from(*b)),
					Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
					Value::String(s) => parse_number(s),
					Value::Array(_) | Value::Object(_) => f64::NAN,
				}
			}
		}
	}

	/// Truthiness of the raw value, as JS sees it.
	pub fn is_set(&self) -> bool {
		match self {
			Metric::Number(n) => *n != 0.0 && !n.is_nan(),
			Metric::Text(s) => !s.is_empty(),
			Metric::Other(v) => match v {
				Value::Null => false,
				Value::Bool(b) => *b,
				Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
				Value::String(s) => !s.is_empty(),
				Value::Array(_) | Value::Object(_) => true,
			},
		}
	}
}

impl fmt::Display for Metric {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Metric::Number(n) => write!(f, "{n}"),
			Metric::Text(s) => write!(f, "{s}"),
			Metric::Other(v) => write!(f, "{v}"),
		}
	}
}

fn parse_number(s: &str) -> f64 {
	let s = s.trim();
	if s.is_empty() {
		return 0.0;
	}
	match s {
		"Infinity" | "+Infinity" => f64::INFINITY,
		"-Infinity" => f64::NEG_INFINITY,
		// Rust also accepts "inf" and "nan" spellings, which are not numbers here.
		_ if s.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) => f64::NAN,
		_ => s.parse().unwrap_or(f64::NAN),
	}
}

/// Magnitudes from here on render in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e21;
/// 2^52: scaled values this large have no fraction left to round.
const MAX_FRACTIONAL: f64 = 4_503_599_627_370_496.0;

/// Fixed-point rendering with half-away-from-zero rounding.
fn to_fixed(num: f64, digits: usize) -> String {
	if num.is_nan() {
		return "NaN".to_string();
	}
	if num.is_infinite() {
		return if num > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
	}
	if num.abs() >= EXPONENT_THRESHOLD {
		return to_exponential(num);
	}
	let factor = 10f64.powi(digits as i32);
	let scaled = num * factor;
	let mut rounded = if scaled.abs() >= MAX_FRACTIONAL {
		num
	} else {
		scaled.round() / factor
	};
	if rounded == 0.0 {
		rounded = 0.0;
	}
	format!("{rounded:.digits$}")
}

/// Shortest exponent form with an explicit sign, e.g. `1.5e+300`.
fn to_exponential(num: f64) -> String {
	let formatted = format!("{num:e}");
	match formatted.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
		_ => formatted,
	}
}

/// Strip trailing zeroes and a dangling decimal point.
fn trim_fixed(fixed: String) -> String {
	if !fixed.contains('.') || fixed.contains('e') {
		return fixed;
	}
	fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Request rate rounded to two decimals. `unit` defaults to `rps`.
pub fn format_rate(value: impl Into<Metric>, include_units: bool, unit: Option<&str>) -> String {
	let rate = trim_fixed(to_fixed(value.into().value(), 2));
	if include_units {
		format!("{rate} {}", unit.unwrap_or("rps"))
	} else {
		rate
	}
}

/// Error percentage, e.g. `5% err` or `0.3% err`.
pub fn format_error_rate(value: impl Into<Metric>) -> String {
	let num = value.into().value();
	let digits = if num < 1.0 { 1 } else { 0 };
	format!("{}% err", trim_fixed(to_fixed(num, digits)))
}

/// Byte rate in `bps` below 1024, `kps` from there on.
pub fn format_byte_rate(value: impl Into<Metric>, include_units: bool) -> String {
	let num = value.into().value();
	// NaN compares false, so it takes the kps branch and still renders as NaN.
	if num < 1024.0 {
		let rate = if num < 1.0 {
			trim_fixed(to_fixed(num, 2))
		} else {
			to_fixed(num, 0)
		};
		return if include_units { format!("{rate} bps") } else { rate };
	}
	let rate = trim_fixed(to_fixed(num / 1024.0, 2));
	if include_units { format!("{rate} kps") } else { rate }
}

/// Percentage with one decimal, trailing zeroes trimmed.
pub fn format_percent(value: impl Into<Metric>) -> String {
	format!("{}%", trim_fixed(to_fixed(value.into().value(), 1)))
}

/// Milliseconds below one second, seconds from there on.
pub fn format_duration(value: impl Into<Metric>) -> String {
	let num = value.into().value();
	if num < 1000.0 {
		return format!("{}ms", to_fixed(num, 0));
	}
	format!("{}s", trim_fixed(to_fixed(num / 1000.0, 2)))
}
