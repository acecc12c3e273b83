//! Typed option blocks and their KDL parsers.

use std::fmt;
use std::str::FromStr;

use kdl::KdlNode;
use todomark_primitives::Rgb;

use crate::error::{ConfigError, Result};
use crate::kdl_util::{bool_arg, number_arg, parse_color, string_arg};

/// Which text is searched for the marker token once a comment is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchScope {
	/// Search the whole requested span, once per call.
	#[default]
	Span,
	/// Search each comment fragment on its own.
	Comment,
}

impl MatchScope {
	pub fn as_str(self) -> &'static str {
		match self {
			MatchScope::Span => "span",
			MatchScope::Comment => "comment",
		}
	}
}

impl fmt::Display for MatchScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MatchScope {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"span" => Ok(MatchScope::Span),
			"comment" => Ok(MatchScope::Comment),
			_ => Err(ConfigError::InvalidValue {
				option: "scope".to_string(),
				expected: "\"span\" or \"comment\"",
			}),
		}
	}
}

/// Options for the todo-comment classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifierOptions {
	pub scope: MatchScope,
}

/// Options for the scrollbar marker margin.
///
/// Distances are in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginOptions {
	pub enabled: bool,
	/// Width of the strip the markers are drawn on.
	pub width: f64,
	/// Side length of each square marker.
	pub marker_size: f64,
	pub marker_left: f64,
	/// Added to the mapped line top.
	pub marker_offset: f64,
	/// Marker fill; `None` uses the todo-comment format background.
	pub fill: Option<Rgb>,
}

impl Default for MarginOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			width: 10.0,
			marker_size: 6.0,
			marker_left: 1.0,
			marker_offset: 3.0,
			fill: None,
		}
	}
}

pub(crate) fn parse_classifier_node(node: &KdlNode) -> Result<ClassifierOptions> {
	let mut opts = ClassifierOptions::default();
	let Some(children) = node.children() else {
		return Ok(opts);
	};

	for opt in children.nodes() {
		match opt.name().value() {
			"scope" => opts.scope = string_arg(opt)?.parse()?,
			other => {
				return Err(ConfigError::UnknownOption {
					section: "classifier",
					key: other.to_string(),
				});
			}
		}
	}
	Ok(opts)
}

pub(crate) fn parse_margin_node(node: &KdlNode) -> Result<MarginOptions> {
	let mut opts = MarginOptions::default();
	let Some(children) = node.children() else {
		return Ok(opts);
	};

	for opt in children.nodes() {
		match opt.name().value() {
			"enabled" => opts.enabled = bool_arg(opt)?,
			"width" => opts.width = number_arg(opt)?,
			"marker-size" => opts.marker_size = number_arg(opt)?,
			"marker-left" => opts.marker_left = number_arg(opt)?,
			"marker-offset" => opts.marker_offset = number_arg(opt)?,
			"fill" => opts.fill = Some(parse_color(string_arg(opt)?)?),
			other => {
				return Err(ConfigError::UnknownOption {
					section: "margin",
					key: other.to_string(),
				});
			}
		}
	}
	Ok(opts)
}
