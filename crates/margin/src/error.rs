use todomark_primitives::{CharIdx, CharLen};
use thiserror::Error;

/// Why a buffer position could not be mapped onto the scrollbar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
	/// The mapper tracks a different version than the one asked about.
	#[error("scroll map is at version {expected}, position refers to version {found}")]
	StaleSnapshot { expected: u64, found: u64 },

	#[error("position {position} is past the end of a {len} char snapshot")]
	PositionOutOfRange { position: CharIdx, len: CharLen },
}

/// Errors surfaced by the margin's public operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarginError {
	/// The margin was used after [`dispose`](crate::TodoScrollMargin::dispose).
	#[error("margin '{margin}' has been disposed")]
	Disposed { margin: &'static str },
}
