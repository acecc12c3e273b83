//! Locating the `TODO` token.
//!
//! Offsets are in characters, matching [`SnapshotSpan`](todomark_primitives::SnapshotSpan).

use todomark_primitives::{CharIdx, CharLen};

/// The fixed marker token.
pub const TODO_TOKEN: &str = "TODO";

/// Length of [`TODO_TOKEN`] in characters.
pub const TODO_TOKEN_LEN: CharLen = 4;

/// Character offset of the first occurrence of the token in `text`.
pub fn find_token(text: &str) -> Option<CharIdx> {
	text.find(TODO_TOKEN)
		.map(|byte_idx| text[..byte_idx].chars().count())
}

/// Offset of the first token occurrence, counted only when it is not the very
/// first character of `text`.
///
/// Only the first occurrence is considered: text starting with the token
/// yields `None` even if the token appears again later.
pub fn marker_offset(text: &str) -> Option<CharIdx> {
	find_token(text).filter(|&idx| idx > 0)
}
