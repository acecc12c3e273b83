//! Error types for configuration parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing KDL syntax.
	#[error("KDL parse error: {0}")]
	Kdl(#[from] kdl::KdlError),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A color value could not be parsed.
	#[error("invalid color format: {0}")]
	InvalidColor(String),

	/// An option value has the wrong type or is out of range.
	#[error("invalid value for option '{option}': expected {expected}")]
	InvalidValue {
		/// The option's KDL key.
		option: String,
		/// Human-readable description of what was expected.
		expected: &'static str,
	},

	/// An unknown option was specified inside a known section.
	#[error("unknown option '{key}' in '{section}' block")]
	UnknownOption {
		/// The section the option appeared in.
		section: &'static str,
		/// The unrecognized option key.
		key: String,
	},
}

/// Non-fatal issues found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A top-level node that no section handles; it is ignored.
	UnknownSection(String),
	/// A section appeared more than once; the last occurrence wins.
	DuplicateSection(&'static str),
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigWarning::UnknownSection(name) => write!(f, "unknown section '{name}' ignored"),
			ConfigWarning::DuplicateSection(name) => {
				write!(f, "section '{name}' given more than once, using the last one")
			}
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
