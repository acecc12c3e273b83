//! Configuration for the todo marker add-on.
//!
//! Configuration is written in KDL (v2). Both sections are optional and fall
//! back to their defaults:
//!
//! ```kdl
//! classifier {
//!     scope "span"        // or "comment"
//! }
//!
//! margin {
//!     enabled #true
//!     width 10
//!     marker-size 6
//!     marker-left 1
//!     marker-offset 3
//!     fill "#f4f4f4"
//! }
//! ```
//!
//! Unknown options inside a section are errors. Unknown top-level sections
//! are collected in [`Config::warnings`] so that a config shared with a newer
//! version still loads.

pub mod error;
pub mod kdl_util;
pub mod options;

use std::path::Path;

pub use error::{ConfigError, ConfigWarning, Result};
pub use options::{ClassifierOptions, MarginOptions, MatchScope};

/// Parsed configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
	pub classifier: ClassifierOptions,
	pub margin: MarginOptions,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

impl Config {
	/// Parse a KDL string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let doc: kdl::KdlDocument = input.parse()?;
		let mut config = Config::default();
		let mut seen_classifier = false;
		let mut seen_margin = false;

		for node in doc.nodes() {
			match node.name().value() {
				"classifier" => {
					if std::mem::replace(&mut seen_classifier, true) {
						config.warnings.push(ConfigWarning::DuplicateSection("classifier"));
					}
					config.classifier = options::parse_classifier_node(node)?;
				}
				"margin" => {
					if std::mem::replace(&mut seen_margin, true) {
						config.warnings.push(ConfigWarning::DuplicateSection("margin"));
					}
					config.margin = options::parse_margin_node(node)?;
				}
				other => config
					.warnings
					.push(ConfigWarning::UnknownSection(other.to_string())),
			}
		}

		Ok(config)
	}

	/// Read and parse a config file, logging any warnings.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::parse(&content)?;
		for warning in &config.warnings {
			tracing::warn!(path = %path.display(), %warning, "Config warning");
		}
		Ok(config)
	}
}
