//! Shared fixtures for margin integration tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use todomark_config::MarginOptions;
use todomark_margin::{
	CoordinateMapper, LayoutChanged, LayoutEvents, MapError, MarginHost, MarkerSet, RenderSurface, ScrollMap,
	TodoScrollMargin,
};
use todomark_primitives::{CharIdx, Snapshot, SnapshotSpan, TextBuffer};
use todomark_syntax::{
	Aggregator, ClassificationKind, ClassifiedSpan, Classifier, ClassifierOptions, StaticProvider,
	TodoClassifierProvider,
};

/// Height of the strip used by every fixture.
pub const TRACK_HEIGHT: f64 = 100.0;

/// Upstream classifier for `//` line comments.
///
/// Everything before the first `//` is a keyword, the rest of the span a comment.
pub fn line_comments() -> Rc<dyn Classifier> {
	Rc::new(|span: &SnapshotSpan| {
		let text = span.text();
		let Some(byte_idx) = text.find("//") else {
			return vec![ClassifiedSpan::new(span.clone(), ClassificationKind::Keyword)];
		};
		let at = text[..byte_idx].chars().count();
		let mut out = Vec::new();
		if at > 0 {
			out.extend(
				span.sub_span(0, at)
					.ok()
					.map(|s| ClassifiedSpan::new(s, ClassificationKind::Keyword)),
			);
		}
		out.extend(
			span.sub_span(at, span.len() - at)
				.ok()
				.map(|s| ClassifiedSpan::new(s, ClassificationKind::Comment)),
		);
		out
	})
}

/// Upstream classifier treating all text as one comment.
pub fn all_comment() -> Rc<dyn Classifier> {
	Rc::new(|span: &SnapshotSpan| vec![ClassifiedSpan::new(span.clone(), ClassificationKind::Comment)])
}

/// Aggregator running `upstream` plus the todo classifier.
pub fn pipeline(upstream: Rc<dyn Classifier>) -> Rc<Aggregator> {
	Rc::new(
		Aggregator::new()
			.with_provider(Rc::new(StaticProvider::new(upstream)))
			.with_provider(Rc::new(TodoClassifierProvider::new(ClassifierOptions::default()))),
	)
}

/// Surface recording every set it is handed.
#[derive(Default)]
pub struct RecordingSurface {
	pub sets: RefCell<Vec<MarkerSet>>,
}

impl RenderSurface for RecordingSurface {
	fn replace_markers(&self, markers: &MarkerSet) {
		self.sets.borrow_mut().push(markers.clone());
	}
}

/// Mapper refusing to map one line, delegating everything else.
pub struct UnmappableLine {
	pub inner: Rc<ScrollMap>,
	pub line: usize,
}

impl CoordinateMapper for UnmappableLine {
	fn buffer_position_to_scroll_coordinate(&self, snapshot: &Snapshot, position: CharIdx) -> Result<f64, MapError> {
		if snapshot.line_of(position) == Some(self.line) {
			return Err(MapError::StaleSnapshot {
				expected: snapshot.version() + 1,
				found: snapshot.version(),
			});
		}
		self.inner.buffer_position_to_scroll_coordinate(snapshot, position)
	}

	fn scroll_coordinate_to_pixel_y(&self, coordinate: f64) -> f64 {
		self.inner.scroll_coordinate_to_pixel_y(coordinate)
	}
}

/// A buffer wired to a view, scroll map, surface and margin.
pub struct Harness {
	pub buffer: TextBuffer,
	pub view: Rc<LayoutEvents>,
	pub map: Rc<ScrollMap>,
	pub surface: Rc<RecordingSurface>,
	pub margin: Rc<TodoScrollMargin>,
}

impl Harness {
	pub fn new(text: &str) -> Self {
		Self::build(text, line_comments(), MarginOptions::default(), None)
	}

	pub fn with_upstream(text: &str, upstream: Rc<dyn Classifier>) -> Self {
		Self::build(text, upstream, MarginOptions::default(), None)
	}

	pub fn with_options(text: &str, options: MarginOptions) -> Self {
		Self::build(text, line_comments(), options, None)
	}

	/// Harness whose mapper fails for every position on `line`.
	pub fn with_unmappable_line(text: &str, line: usize) -> Self {
		Self::build(text, line_comments(), MarginOptions::default(), Some(line))
	}

	fn build(text: &str, upstream: Rc<dyn Classifier>, options: MarginOptions, bad_line: Option<usize>) -> Self {
		let _ = tracing_subscriber::fmt::try_init();
		let buffer = TextBuffer::new(text);
		let view = Rc::new(LayoutEvents::new());
		let map = Rc::new(ScrollMap::new(buffer.snapshot(), 0.0, TRACK_HEIGHT));
		let scroll_map: Rc<dyn CoordinateMapper> = match bad_line {
			Some(line) => Rc::new(UnmappableLine {
				inner: map.clone(),
				line,
			}),
			None => map.clone(),
		};
		let surface = Rc::new(RecordingSurface::default());
		let margin = TodoScrollMargin::attach(
			MarginHost {
				view: view.clone(),
				scroll_map,
				aggregator: pipeline(upstream),
				surface: Some(surface.clone()),
			},
			options,
		);

		Self {
			buffer,
			view,
			map,
			surface,
			margin,
		}
	}

	/// Lays out `snapshot` as the view would: the scroll map follows, then the event fires.
	pub fn layout_snapshot(&self, snapshot: &Arc<Snapshot>) -> usize {
		self.map.set_snapshot(snapshot.clone());
		self.view.emit(&LayoutChanged::new(snapshot.clone()))
	}

	/// Lays out the buffer's current snapshot.
	pub fn layout(&self) -> usize {
		self.layout_snapshot(&self.buffer.snapshot())
	}

	pub fn edit(&mut self, text: &str) -> Arc<Snapshot> {
		self.buffer.set_text(text)
	}

	pub fn marked_lines(&self) -> Vec<usize> {
		self.margin
			.markers()
			.map(|set| set.lines().collect())
			.unwrap_or_default()
	}

	pub fn marker_tops(&self) -> Vec<f64> {
		self.margin
			.markers()
			.map(|set| set.shapes.iter().map(|shape| shape.top).collect())
			.unwrap_or_default()
	}
}

/// `count` lines of filler with a todo comment on each line in `todo_lines`.
pub fn document(count: usize, todo_lines: &[usize]) -> String {
	(0..count)
		.map(|line| {
			if todo_lines.contains(&line) {
				format!("let v{line} = {line}; // TODO: handle {line}")
			} else {
				format!("let v{line} = {line};")
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}
