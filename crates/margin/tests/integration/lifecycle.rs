use std::rc::Rc;

use pretty_assertions::assert_eq;
use todomark_margin::{LayoutChanged, MARGIN_NAME, MarginError, MarkerSet};

use crate::common::Harness;

const DISPOSED: MarginError = MarginError::Disposed { margin: MARGIN_NAME };

#[test]
fn attach_subscribes_once() {
	let harness = Harness::new("// TODO");
	assert_eq!(harness.view.subscriber_count(), 1);
	assert_eq!(harness.margin.enabled(), Ok(true));
	assert_eq!(harness.margin.name(), Ok(MARGIN_NAME));
	assert_eq!(harness.margin.margin_size(), Ok(10.0));
}

#[test]
fn margin_lookup_ignores_case() {
	let harness = Harness::new("");
	let found = harness.margin.margin("todoscrollbarannotationmargin").unwrap();
	assert!(found.is_some_and(|margin| std::ptr::eq(margin, Rc::as_ptr(&harness.margin))));
	assert!(harness.margin.margin("VerticalScrollBar").unwrap().is_none());
}

#[test]
fn accessors_fail_after_dispose() {
	let harness = Harness::new("// TODO");
	harness.layout();
	harness.margin.dispose();

	assert!(harness.margin.is_disposed());
	assert_eq!(harness.margin.markers(), Err(DISPOSED));
	assert_eq!(harness.margin.margin_size(), Err(DISPOSED));
	assert_eq!(harness.margin.enabled(), Err(DISPOSED));
	assert_eq!(harness.margin.fill(), Err(DISPOSED));
	assert_eq!(harness.margin.name(), Err(DISPOSED));
	assert!(harness.margin.margin(MARGIN_NAME).is_err());
}

#[test]
fn events_fail_after_dispose() {
	let harness = Harness::new("// TODO");
	harness.margin.dispose();

	assert_eq!(harness.view.subscriber_count(), 0);
	assert_eq!(harness.layout(), 0);
	let event = LayoutChanged::new(harness.buffer.snapshot());
	assert_eq!(harness.margin.on_layout_changed(&event), Err(DISPOSED));
}

#[test]
fn dispose_is_idempotent() {
	let harness = Harness::new("// TODO");
	harness.layout();
	harness.margin.dispose();
	harness.margin.dispose();

	let sets = harness.surface.sets.borrow();
	assert_eq!(sets.len(), 2);
	assert_eq!(sets[1], MarkerSet::default());
}

#[test]
fn dropping_the_margin_unsubscribes() {
	let Harness {
		view,
		surface,
		margin,
		..
	} = Harness::new("// TODO");

	drop(margin);
	assert_eq!(view.subscriber_count(), 0);
	assert_eq!(surface.sets.borrow().last(), Some(&MarkerSet::default()));
}
