//! Core text types shared by the classifier and the marker margin.
//!
//! Everything here is immutable once built: a [`TextBuffer`] produces a new
//! [`Snapshot`] for every edit, and [`SnapshotSpan`] / [`SnapshotLine`] are
//! views into exactly one snapshot.

/// RGB colors for marker fills and classification formats.
pub mod color;
/// Identifier types for buffers.
pub mod ids;
/// Line views and line break handling.
pub mod line;
/// Versioned snapshots and the mutable buffer producing them.
pub mod snapshot;
/// Character ranges over a snapshot.
pub mod span;

pub use color::Rgb;
pub use ids::BufferId;
pub use line::{Lines, SnapshotLine};
pub use ropey::{Rope, RopeSlice};
pub use snapshot::{Snapshot, TextBuffer};
pub use span::{SnapshotSpan, SpanError, SpanKey};

/// A position in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// Kept distinct from [`CharIdx`] so signatures say which one they expect.
pub type CharLen = usize;
