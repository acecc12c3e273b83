use std::sync::Arc;

use ropey::RopeSlice;

use crate::span::SnapshotSpan;
use crate::{CharIdx, CharLen, Snapshot};

/// Returns true for every character ropey treats as a line break.
#[inline]
fn is_line_break(c: char) -> bool {
	matches!(
		c,
		'\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
	)
}

/// Length of the line break terminating `line`, `\r\n` counting as two chars.
pub fn line_break_len(line: RopeSlice) -> CharLen {
	let len = line.len_chars();
	if len == 0 {
		return 0;
	}
	let last = line.char(len - 1);
	if last == '\n' && len >= 2 && line.char(len - 2) == '\r' {
		2
	} else if is_line_break(last) {
		1
	} else {
		0
	}
}

/// One line of a snapshot.
///
/// Lines partition the snapshot: each line's full extent (content plus break)
/// starts where the previous one ends.
#[derive(Debug, Clone)]
pub struct SnapshotLine {
	snapshot: Arc<Snapshot>,
	number: usize,
	start: CharIdx,
	len: CharLen,
	break_len: CharLen,
}

impl SnapshotLine {
	pub(crate) fn new(snapshot: &Arc<Snapshot>, number: usize) -> Option<Self> {
		if number >= snapshot.line_count() {
			return None;
		}
		let text = snapshot.text();
		let start = text.line_to_char(number);
		let full = text.line(number);
		let break_len = line_break_len(full);
		Some(Self {
			snapshot: Arc::clone(snapshot),
			number,
			start,
			len: full.len_chars() - break_len,
			break_len,
		})
	}

	pub fn snapshot(&self) -> &Arc<Snapshot> {
		&self.snapshot
	}

	/// Zero-based line number.
	pub fn number(&self) -> usize {
		self.number
	}

	pub fn start(&self) -> CharIdx {
		self.start
	}

	/// Content length, excluding the line break.
	pub fn len(&self) -> CharLen {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// End of the content, excluding the line break.
	pub fn end(&self) -> CharIdx {
		self.start + self.len
	}

	/// End of the line including its break.
	pub fn end_including_break(&self) -> CharIdx {
		self.end() + self.break_len
	}

	pub fn break_len(&self) -> CharLen {
		self.break_len
	}

	/// Span over the line's content.
	pub fn extent(&self) -> SnapshotSpan {
		SnapshotSpan::from_parts(Arc::clone(&self.snapshot), self.start, self.len)
	}
}

/// Iterator over the lines of a snapshot, top to bottom.
#[derive(Debug, Clone)]
pub struct Lines {
	snapshot: Arc<Snapshot>,
	next: usize,
}

impl Lines {
	pub(crate) fn new(snapshot: Arc<Snapshot>) -> Self {
		Self { snapshot, next: 0 }
	}
}

impl Iterator for Lines {
	type Item = SnapshotLine;

	fn next(&mut self) -> Option<Self::Item> {
		let line = SnapshotLine::new(&self.snapshot, self.next)?;
		self.next += 1;
		Some(line)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.snapshot.line_count().saturating_sub(self.next);
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for Lines {}
