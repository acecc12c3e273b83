//! The todo scrollbar margin.
//!
//! The margin owns the marker set for one view. Every layout change triggers
//! a full rebuild: each line of the new snapshot is classified, lines with a
//! todo comment are mapped onto the strip and the resulting set replaces the
//! previous one in a single step.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use todomark_config::MarginOptions;
use todomark_primitives::{Rgb, Snapshot, SnapshotLine};
use todomark_syntax::{BusyFlag, ClassificationKind, Classifier, ClassifierAggregator, TODO_COMMENT_FORMAT};

use crate::error::{MapError, MarginError};
use crate::events::{LayoutChanged, LayoutHandler, SubscriptionId, TextView};
use crate::mapper::CoordinateMapper;
use crate::shape::{LineBounds, MarkerSet, MarkerShape, RenderSurface, SnapshotStamp};


/// Name the margin answers to in [`TodoScrollMargin::margin`].
pub const MARGIN_NAME: &str = "TodoScrollBarAnnotationMargin";

/// Fallback fill if neither the options nor the format name a color.
const DEFAULT_FILL: Rgb = Rgb::new(244, 244, 244);

/// Collaborators a margin is attached to.
pub struct MarginHost {
	pub view: Rc<dyn TextView>,
	pub scroll_map: Rc<dyn CoordinateMapper>,
	pub aggregator: Rc<dyn ClassifierAggregator>,
	/// Receives every published marker set, if present.
	pub surface: Option<Rc<dyn RenderSurface>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
	Active,
	Disposed,
}

/// Scrollbar margin marking every line that contains a todo comment.
pub struct TodoScrollMargin {
	host: MarginHost,
	options: MarginOptions,
	fill: Rgb,
	lifecycle: Cell<Lifecycle>,
	subscription: Cell<Option<SubscriptionId>>,
	markers: RefCell<MarkerSet>,
	rebuilding: BusyFlag,
	/// Latest event delivered while a rebuild was running.
	pending: RefCell<Option<LayoutChanged>>,
}

impl TodoScrollMargin {
	/// Creates a margin and subscribes it to the host view's layout events.
	///
	/// The subscription only holds a weak reference; dropping the last `Rc`
	/// disposes the margin and unsubscribes.
	pub fn attach(host: MarginHost, options: MarginOptions) -> Rc<Self> {
		Rc::new_cyclic(|weak: &Weak<Self>| {
			let weak = weak.clone();
			let handler: LayoutHandler = Rc::new(move |event: &LayoutChanged| {
				let Some(margin) = weak.upgrade() else {
					return;
				};
				if let Err(error) = margin.on_layout_changed(event) {
					tracing::warn!(%error, buffer = %event.buffer(), "Layout event reached a disposed margin");
				}
			});
			let subscription = host.view.subscribe_layout(handler);
			let fill = options.fill.or(TODO_COMMENT_FORMAT.background).unwrap_or(DEFAULT_FILL);

			Self {
				host,
				options,
				fill,
				lifecycle: Cell::new(Lifecycle::Active),
				subscription: Cell::new(Some(subscription)),
				markers: RefCell::new(MarkerSet::default()),
				rebuilding: BusyFlag::new(),
				pending: RefCell::new(None),
			}
		})
	}

	/// Handles a layout change by rebuilding the marker set.
	///
	/// If a rebuild is already running, the event is parked and processed
	/// once the running rebuild completes; a later parked event replaces an
	/// earlier one.
	///
	/// # Errors
	///
	/// Returns [`MarginError::Disposed`] after [`dispose`](Self::dispose).
	pub fn on_layout_changed(&self, event: &LayoutChanged) -> Result<(), MarginError> {
		self.ensure_active()?;
		if !self.options.enabled {
			tracing::trace!(buffer = %event.buffer(), "Margin disabled, ignoring layout event");
			return Ok(());
		}

		let Some(_guard) = self.rebuilding.try_enter() else {
			tracing::trace!(
				buffer = %event.buffer(),
				version = event.snapshot.version(),
				"Rebuild in flight, parking layout event"
			);
			*self.pending.borrow_mut() = Some(event.clone());
			return Ok(());
		};

		let mut snapshot = Arc::clone(&event.snapshot);
		loop {
			self.rebuild(&snapshot);
			let Some(next) = self.pending.borrow_mut().take() else {
				break;
			};
			snapshot = next.snapshot;
		}
		Ok(())
	}

	fn rebuild(&self, snapshot: &Arc<Snapshot>) {
		if self.is_disposed() {
			return;
		}

		let stamp = SnapshotStamp::of(snapshot);
		let published = self.markers.borrow().stamp;
		if let Some(published) = published
			&& !published.is_superseded_by(&stamp)
		{
			tracing::debug!(
				buffer = %stamp.buffer,
				version = stamp.version,
				published = published.version,
				"Ignoring layout event for an older snapshot"
			);
			return;
		}

		let markers = match self.host.aggregator.classifier(stamp.buffer) {
			Some(classifier) => self.project(snapshot, classifier.as_ref(), stamp),
			None => {
				tracing::debug!(buffer = %stamp.buffer, "No classifier for buffer, clearing markers");
				MarkerSet::empty(stamp)
			}
		};
		if self.is_disposed() {
			tracing::debug!(buffer = %stamp.buffer, "Margin disposed during rebuild, dropping markers");
			return;
		}
		self.publish(markers);
	}

	fn project(&self, snapshot: &Arc<Snapshot>, classifier: &dyn Classifier, stamp: SnapshotStamp) -> MarkerSet {
		let mut shapes = Vec::new();
		let mut skipped = 0usize;

		for line in snapshot.lines() {
			let has_todo = classifier
				.classify(&line.extent())
				.iter()
				.any(|span| span.kind.is_of_type(ClassificationKind::TodoComment));
			if !has_todo {
				continue;
			}

			match self.line_bounds(snapshot, &line) {
				Ok(bounds) => shapes.push(self.marker(line.number(), bounds)),
				Err(error) => {
					skipped += 1;
					tracing::debug!(line = line.number(), %error, "Skipping todo line that cannot be mapped");
				}
			}
		}

		tracing::debug!(
			buffer = %stamp.buffer,
			version = stamp.version,
			lines = snapshot.line_count(),
			markers = shapes.len(),
			skipped,
			"Rebuilt todo markers"
		);
		MarkerSet {
			stamp: Some(stamp),
			shapes,
		}
	}

	/// Pixel extent of `line` on the strip, padded by two pixels either side.
	fn line_bounds(&self, snapshot: &Snapshot, line: &SnapshotLine) -> Result<LineBounds, MapError> {
		let map = &self.host.scroll_map;
		let start = map.buffer_position_to_scroll_coordinate(snapshot, line.start())?;
		let end = map.buffer_position_to_scroll_coordinate(snapshot, line.end())?;

		Ok(LineBounds {
			top: map.scroll_coordinate_to_pixel_y(start - 0.5).round() - 2.0,
			bottom: map.scroll_coordinate_to_pixel_y(end + 0.5).round() + 2.0,
		})
	}

	fn marker(&self, line: usize, bounds: LineBounds) -> MarkerShape {
		MarkerShape {
			line,
			top: bounds.top + self.options.marker_offset,
			left: self.options.marker_left,
			width: self.options.marker_size,
			height: self.options.marker_size,
			fill: self.fill,
			hit_test_visible: false,
		}
	}

	fn publish(&self, markers: MarkerSet) {
		*self.markers.borrow_mut() = markers.clone();
		if let Some(surface) = &self.host.surface {
			surface.replace_markers(&markers);
		}
	}

	fn ensure_active(&self) -> Result<(), MarginError> {
		match self.lifecycle.get() {
			Lifecycle::Active => Ok(()),
			Lifecycle::Disposed => Err(MarginError::Disposed { margin: MARGIN_NAME }),
		}
	}

	/// The currently published markers.
	pub fn markers(&self) -> Result<MarkerSet, MarginError> {
		self.ensure_active()?;
		Ok(self.markers.borrow().clone())
	}

	/// Width of the strip in pixels.
	pub fn margin_size(&self) -> Result<f64, MarginError> {
		self.ensure_active()?;
		Ok(self.options.width)
	}

	pub fn enabled(&self) -> Result<bool, MarginError> {
		self.ensure_active()?;
		Ok(self.options.enabled)
	}

	pub fn fill(&self) -> Result<Rgb, MarginError> {
		self.ensure_active()?;
		Ok(self.fill)
	}

	pub fn name(&self) -> Result<&'static str, MarginError> {
		self.ensure_active()?;
		Ok(MARGIN_NAME)
	}

	/// Returns `self` if `name` matches [`MARGIN_NAME`], ignoring ASCII case.
	pub fn margin(&self, name: &str) -> Result<Option<&Self>, MarginError> {
		self.ensure_active()?;
		Ok(name.eq_ignore_ascii_case(MARGIN_NAME).then_some(self))
	}

	pub fn is_disposed(&self) -> bool {
		self.lifecycle.get() == Lifecycle::Disposed
	}

	/// Unsubscribes from the view and releases the markers.
	///
	/// Only the first call has an effect. The surface, if any, is handed an
	/// empty set.
	pub fn dispose(&self) {
		if self.lifecycle.replace(Lifecycle::Disposed) == Lifecycle::Disposed {
			return;
		}

		let unsubscribed = self
			.subscription
			.take()
			.is_some_and(|id| self.host.view.unsubscribe_layout(id));
		self.pending.borrow_mut().take();
		let released = std::mem::take(&mut *self.markers.borrow_mut());
		if let Some(surface) = &self.host.surface {
			surface.replace_markers(&MarkerSet::default());
		}
		tracing::debug!(released = released.len(), unsubscribed, "Disposed todo margin");
	}
}

impl Drop for TodoScrollMargin {
	fn drop(&mut self) {
		self.dispose();
	}
}
