//! Mapping buffer positions onto the scrollbar strip.
//!
//! Mapping is two-step, as on a host scrollbar: a buffer position becomes a
//! scroll coordinate (measured in lines), and a scroll coordinate becomes a
//! pixel offset on the strip.

use std::cell::RefCell;
use std::sync::Arc;

use todomark_primitives::{CharIdx, Snapshot};

use crate::error::MapError;

pub trait CoordinateMapper {
	/// Scroll coordinate of `position` in `snapshot`.
	///
	/// Fails when the mapper cannot resolve the position, e.g. because it
	/// tracks a different snapshot version.
	fn buffer_position_to_scroll_coordinate(
		&self,
		snapshot: &Snapshot,
		position: CharIdx,
	) -> Result<f64, MapError>;

	/// Pixel offset from the top of the strip for a scroll coordinate.
	fn scroll_coordinate_to_pixel_y(&self, coordinate: f64) -> f64;
}

/// Proportional scroll map over the whole document.
///
/// A position on line `n` maps to coordinate `n + column / (line_len + 1)`,
/// so the document spans coordinates `0..line_count`, and the strip's pixel
/// height is divided evenly among lines regardless of the current scroll
/// offset.
#[derive(Debug)]
pub struct ScrollMap {
	snapshot: RefCell<Arc<Snapshot>>,
	track_top: f64,
	track_height: f64,
}

impl ScrollMap {
	pub fn new(snapshot: Arc<Snapshot>, track_top: f64, track_height: f64) -> Self {
		Self {
			snapshot: RefCell::new(snapshot),
			track_top,
			track_height: track_height.max(0.0),
		}
	}

	/// Follows the buffer to a newer snapshot. Positions in any other version
	/// are rejected as stale.
	pub fn set_snapshot(&self, snapshot: Arc<Snapshot>) {
		*self.snapshot.borrow_mut() = snapshot;
	}
}

impl CoordinateMapper for ScrollMap {
	fn buffer_position_to_scroll_coordinate(&self, snapshot: &Snapshot, position: CharIdx) -> Result<f64, MapError> {
		let current = self.snapshot.borrow();
		if current.buffer() != snapshot.buffer() || current.version() != snapshot.version() {
			return Err(MapError::StaleSnapshot {
				expected: current.version(),
				found: snapshot.version(),
			});
		}

		let line_idx = snapshot
			.line_of(position)
			.ok_or(MapError::PositionOutOfRange {
				position,
				len: snapshot.len_chars(),
			})?;
		let line_start = snapshot.text().line_to_char(line_idx);
		let line_len = snapshot.text().line(line_idx).len_chars();
		let column = (position - line_start) as f64;
		Ok(line_idx as f64 + column / (line_len as f64 + 1.0))
	}

	fn scroll_coordinate_to_pixel_y(&self, coordinate: f64) -> f64 {
		let lines = self.snapshot.borrow().line_count().max(1) as f64;
		let clamped = coordinate.clamp(0.0, lines);
		self.track_top + clamped / lines * self.track_height
	}
}
