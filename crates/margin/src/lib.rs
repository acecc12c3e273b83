//! Scrollbar margin showing a marker for every line with a todo comment.
//!
//! [`TodoScrollMargin`] listens for layout changes on a [`TextView`],
//! classifies every line of the new snapshot through a
//! [`ClassifierAggregator`](todomark_syntax::ClassifierAggregator) and maps
//! each matching line onto the scrollbar strip with a [`CoordinateMapper`].
//! The result is published as a [`MarkerSet`], replacing the previous one
//! wholesale.

pub mod error;
pub mod events;
pub mod mapper;
pub mod margin;
pub mod shape;

pub use error::{MapError, MarginError};
pub use events::{LayoutChanged, LayoutEvents, LayoutHandler, SubscriptionId, TextView};
pub use mapper::{CoordinateMapper, ScrollMap};
pub use margin::{MARGIN_NAME, MarginHost, TodoScrollMargin};
pub use shape::{LineBounds, MarkerSet, MarkerShape, RenderSurface, SnapshotStamp};
