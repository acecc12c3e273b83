//! KDL value helpers shared by the option parsers.

use kdl::{KdlNode, KdlValue};
use todomark_primitives::Rgb;

use crate::error::{ConfigError, Result};

/// Parses a hex color (`#RGB` or `#RRGGBB`, leading `#` optional).
pub fn parse_color(value: &str) -> Result<Rgb> {
	let hex = value.trim().trim_start_matches('#');
	let err = || ConfigError::InvalidColor(value.to_string());
	if !hex.is_ascii() {
		return Err(err());
	}

	match hex.len() {
		3 => {
			let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).map_err(|_| err())?;
			let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).map_err(|_| err())?;
			let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).map_err(|_| err())?;
			Ok(Rgb::new(r, g, b))
		}
		6 => {
			let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| err())?;
			let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| err())?;
			let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| err())?;
			Ok(Rgb::new(r, g, b))
		}
		_ => Err(err()),
	}
}

/// First positional argument of an option node.
pub fn first_arg<'a>(node: &'a KdlNode) -> Option<&'a KdlValue> {
	node.entries()
		.iter()
		.find(|entry| entry.name().is_none())
		.map(|entry| entry.value())
}

/// Reads a non-negative number, accepting both integer and float literals.
pub fn number_arg(node: &KdlNode) -> Result<f64> {
	let key = node.name().value();
	let value = first_arg(node)
		.and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
		.filter(|v| v.is_finite() && *v >= 0.0);
	value.ok_or_else(|| ConfigError::InvalidValue {
		option: key.to_string(),
		expected: "a non-negative number",
	})
}

pub fn bool_arg(node: &KdlNode) -> Result<bool> {
	first_arg(node)
		.and_then(|v| v.as_bool())
		.ok_or_else(|| ConfigError::InvalidValue {
			option: node.name().value().to_string(),
			expected: "#true or #false",
		})
}

pub fn string_arg<'a>(node: &'a KdlNode) -> Result<&'a str> {
	first_arg(node)
		.and_then(|v| v.as_string())
		.ok_or_else(|| ConfigError::InvalidValue {
			option: node.name().value().to_string(),
			expected: "a string",
		})
}
