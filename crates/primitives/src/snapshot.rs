//! Versioned snapshots.
//!
//! A [`Snapshot`] is never mutated after construction. Spans and lines hold an
//! `Arc<Snapshot>`, so they stay valid after the owning [`TextBuffer`] moves on
//! to a newer version.

use std::sync::Arc;

use ropey::{Rope, RopeSlice};

use crate::line::{Lines, SnapshotLine};
use crate::span::{SnapshotSpan, SpanError};
use crate::{BufferId, CharIdx, CharLen};

/// An immutable, versioned view of a buffer's text.
#[derive(Debug, Clone)]
pub struct Snapshot {
	buffer: BufferId,
	version: u64,
	text: Rope,
}

impl Snapshot {
	/// Creates a snapshot of `text` for `buffer` at `version`.
	pub fn new(buffer: BufferId, version: u64, text: Rope) -> Self {
		Self {
			buffer,
			version,
			text,
		}
	}

	pub fn buffer(&self) -> BufferId {
		self.buffer
	}

	pub fn version(&self) -> u64 {
		self.version
	}

	pub fn text(&self) -> RopeSlice<'_> {
		self.text.slice(..)
	}

	/// Total length in characters.
	pub fn len_chars(&self) -> CharLen {
		self.text.len_chars()
	}

	/// Number of lines, including the empty line after a trailing line break.
	pub fn line_count(&self) -> usize {
		self.text.len_lines()
	}

	/// Returns the line index containing `pos`.
	///
	/// `pos == len_chars()` is accepted and maps to the last line.
	pub fn line_of(&self, pos: CharIdx) -> Option<usize> {
		(pos <= self.len_chars()).then(|| self.text.char_to_line(pos))
	}

	/// Returns the line at `idx`, or `None` past the last line.
	pub fn line(self: &Arc<Self>, idx: usize) -> Option<SnapshotLine> {
		SnapshotLine::new(self, idx)
	}

	/// Iterates over all lines in document order.
	pub fn lines(self: &Arc<Self>) -> Lines {
		Lines::new(Arc::clone(self))
	}

	/// Builds a span over this snapshot, validating the range.
	pub fn span(self: &Arc<Self>, start: CharIdx, len: CharLen) -> Result<SnapshotSpan, SpanError> {
		SnapshotSpan::new(Arc::clone(self), start, len)
	}

	/// Span covering the whole snapshot.
	pub fn full_span(self: &Arc<Self>) -> SnapshotSpan {
		SnapshotSpan::from_parts(Arc::clone(self), 0, self.len_chars())
	}
}

/// The mutable owner of a buffer's current [`Snapshot`].
///
/// Every edit bumps the version by one and swaps in a fresh snapshot; older
/// snapshots handed out earlier are left untouched.
#[derive(Debug)]
pub struct TextBuffer {
	id: BufferId,
	current: Arc<Snapshot>,
}

impl TextBuffer {
	/// Creates a buffer with a fresh [`BufferId`] at version 0.
	pub fn new(text: &str) -> Self {
		Self::with_id(BufferId::next(), text)
	}

	pub fn with_id(id: BufferId, text: &str) -> Self {
		Self {
			id,
			current: Arc::new(Snapshot::new(id, 0, Rope::from_str(text))),
		}
	}

	pub fn id(&self) -> BufferId {
		self.id
	}

	/// Returns the current snapshot.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		Arc::clone(&self.current)
	}

	/// Replaces `len` characters at `start` with `text`.
	///
	/// # Errors
	///
	/// Returns [`SpanError::OutOfRange`] if the replaced range does not fit in
	/// the current snapshot; the buffer is left unchanged.
	pub fn replace(&mut self, start: CharIdx, len: CharLen, text: &str) -> Result<Arc<Snapshot>, SpanError> {
		let snapshot_len = self.current.len_chars();
		let end = start
			.checked_add(len)
			.filter(|end| *end <= snapshot_len)
			.ok_or(SpanError::OutOfRange {
				start,
				len,
				snapshot_len,
			})?;

		let mut rope = self.current.text.clone();
		rope.remove(start..end);
		rope.insert(start, text);
		Ok(self.commit(rope))
	}

	/// Inserts `text` at `pos`.
	pub fn insert(&mut self, pos: CharIdx, text: &str) -> Result<Arc<Snapshot>, SpanError> {
		self.replace(pos, 0, text)
	}

	/// Replaces the entire content.
	pub fn set_text(&mut self, text: &str) -> Arc<Snapshot> {
		self.commit(Rope::from_str(text))
	}

	fn commit(&mut self, rope: Rope) -> Arc<Snapshot> {
		self.current = Arc::new(Snapshot::new(self.id, self.current.version + 1, rope));
		self.snapshot()
	}
}
