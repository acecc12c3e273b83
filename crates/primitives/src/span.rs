use std::fmt;
use std::sync::Arc;

use ropey::RopeSlice;
use thiserror::Error;

use crate::{BufferId, CharIdx, CharLen, Snapshot};

/// Errors raised when a range does not fit its snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
	/// The requested range extends past the end of the snapshot.
	#[error("span {start}+{len} is out of range for snapshot of {snapshot_len} chars")]
	OutOfRange {
		start: CharIdx,
		len: CharLen,
		snapshot_len: CharLen,
	},
}

/// Identity of a span: the snapshot it belongs to and its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanKey {
	pub buffer: BufferId,
	pub version: u64,
	pub start: CharIdx,
	pub len: CharLen,
}

/// A half-open character range `[start, start + len)` over one snapshot.
///
/// Spans are validated on construction and never edited in place; derive new
/// ones with [`SnapshotSpan::sub_span`].
#[derive(Clone)]
pub struct SnapshotSpan {
	snapshot: Arc<Snapshot>,
	start: CharIdx,
	len: CharLen,
}

impl SnapshotSpan {
	/// Creates a span, checking that it lies within `snapshot`.
	pub fn new(snapshot: Arc<Snapshot>, start: CharIdx, len: CharLen) -> Result<Self, SpanError> {
		let snapshot_len = snapshot.len_chars();
		match start.checked_add(len) {
			Some(end) if end <= snapshot_len => Ok(Self::from_parts(snapshot, start, len)),
			_ => Err(SpanError::OutOfRange {
				start,
				len,
				snapshot_len,
			}),
		}
	}

	/// Caller guarantees `start + len <= snapshot.len_chars()`.
	pub(crate) fn from_parts(snapshot: Arc<Snapshot>, start: CharIdx, len: CharLen) -> Self {
		debug_assert!(start + len <= snapshot.len_chars());
		Self {
			snapshot,
			start,
			len,
		}
	}

	pub fn snapshot(&self) -> &Arc<Snapshot> {
		&self.snapshot
	}

	pub fn start(&self) -> CharIdx {
		self.start
	}

	pub fn len(&self) -> CharLen {
		self.len
	}

	/// Exclusive end position.
	pub fn end(&self) -> CharIdx {
		self.start + self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn key(&self) -> SpanKey {
		SpanKey {
			buffer: self.snapshot.buffer(),
			version: self.snapshot.version(),
			start: self.start,
			len: self.len,
		}
	}

	/// Borrowed view of the covered text.
	pub fn slice(&self) -> RopeSlice<'_> {
		self.snapshot.text().slice(self.start..self.end())
	}

	/// Copies the covered text out of the rope.
	pub fn text(&self) -> String {
		String::from(self.slice())
	}

	/// Derives a span at `offset` (relative to this span's start) of `len` chars.
	///
	/// The result must stay inside this span.
	pub fn sub_span(&self, offset: CharLen, len: CharLen) -> Result<Self, SpanError> {
		match offset.checked_add(len) {
			Some(end) if end <= self.len => Ok(Self::from_parts(
				Arc::clone(&self.snapshot),
				self.start + offset,
				len,
			)),
			_ => Err(SpanError::OutOfRange {
				start: self.start.saturating_add(offset),
				len,
				snapshot_len: self.snapshot.len_chars(),
			}),
		}
	}

	/// True when both spans refer to the same snapshot version.
	pub fn same_snapshot(&self, other: &Self) -> bool {
		self.snapshot.buffer() == other.snapshot.buffer()
			&& self.snapshot.version() == other.snapshot.version()
	}

	/// True when `other` lies entirely within this span.
	pub fn contains(&self, other: &Self) -> bool {
		self.same_snapshot(other) && self.start <= other.start && other.end() <= self.end()
	}

	/// True when `other` lies within this span and is shorter than it.
	pub fn strictly_contains(&self, other: &Self) -> bool {
		self.contains(other) && other.len < self.len
	}

	/// True when the spans share at least one character.
	pub fn overlaps(&self, other: &Self) -> bool {
		self.same_snapshot(other) && self.start < other.end() && other.start < self.end()
	}

	/// The overlapping part of both spans, if they share any character.
	pub fn intersection(&self, other: &Self) -> Option<Self> {
		if !self.overlaps(other) {
			return None;
		}
		let start = self.start.max(other.start);
		let end = self.end().min(other.end());
		Some(Self::from_parts(Arc::clone(&self.snapshot), start, end - start))
	}
}

impl PartialEq for SnapshotSpan {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}
}

impl Eq for SnapshotSpan {}

impl fmt::Debug for SnapshotSpan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"SnapshotSpan({}@v{} {}..{})",
			self.snapshot.buffer(),
			self.snapshot.version(),
			self.start,
			self.end()
		)
	}
}

#[cfg(test)]
mod tests;
