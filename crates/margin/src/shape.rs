//! Marker shapes and the sets published to a render surface.

use todomark_primitives::{BufferId, Rgb, Snapshot};

/// Vertical pixel extent of one line on the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBounds {
	pub top: f64,
	pub bottom: f64,
}

/// A square marker on the strip, in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerShape {
	/// Zero-based line the marker stands for.
	pub line: usize,
	pub top: f64,
	pub left: f64,
	pub width: f64,
	pub height: f64,
	pub fill: Rgb,
	/// Markers never intercept pointer input; clicks fall through to the scrollbar.
	pub hit_test_visible: bool,
}

/// Identifies the snapshot a [`MarkerSet`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotStamp {
	pub buffer: BufferId,
	pub version: u64,
}

impl SnapshotStamp {
	pub fn of(snapshot: &Snapshot) -> Self {
		Self {
			buffer: snapshot.buffer(),
			version: snapshot.version(),
		}
	}

	/// Whether a set stamped `self` should be replaced by one built from `other`.
	pub fn is_superseded_by(&self, other: &SnapshotStamp) -> bool {
		self.buffer != other.buffer || other.version >= self.version
	}
}

/// Every marker of one rebuild, ordered by line.
///
/// An unstamped set is the initial state and the state after teardown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
	pub stamp: Option<SnapshotStamp>,
	pub shapes: Vec<MarkerShape>,
}

impl MarkerSet {
	pub fn empty(stamp: SnapshotStamp) -> Self {
		Self {
			stamp: Some(stamp),
			shapes: Vec::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.shapes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.shapes.is_empty()
	}

	pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
		self.shapes.iter().map(|shape| shape.line)
	}
}

/// Where a margin paints its markers.
pub trait RenderSurface {
	/// Replaces everything previously shown with `markers`.
	fn replace_markers(&self, markers: &MarkerSet);
}
