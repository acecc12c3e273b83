use ropey::Rope;

use super::*;

fn snap(text: &str) -> Arc<Snapshot> {
	Arc::new(Snapshot::new(BufferId(1), 3, Rope::from_str(text)))
}

#[test]
fn new_validates_range() {
	let s = snap("hello");
	assert!(SnapshotSpan::new(s.clone(), 0, 5).is_ok());
	assert!(SnapshotSpan::new(s.clone(), 5, 0).is_ok());
	assert_eq!(
		SnapshotSpan::new(s.clone(), 3, 3),
		Err(SpanError::OutOfRange {
			start: 3,
			len: 3,
			snapshot_len: 5
		})
	);
	assert!(SnapshotSpan::new(s, usize::MAX, 2).is_err());
}

#[test]
fn text_uses_char_offsets() {
	let s = snap("äö TODO");
	let span = s.span(3, 4).unwrap();
	assert_eq!(span.text(), "TODO");
	assert_eq!(span.end(), 7);
}

#[test]
fn identity_is_snapshot_version_and_range() {
	let a = snap("abcdef");
	let b = Arc::new(Snapshot::new(BufferId(1), 4, Rope::from_str("abcdef")));
	assert_eq!(a.span(1, 2).unwrap(), a.span(1, 2).unwrap());
	assert_ne!(a.span(1, 2).unwrap(), b.span(1, 2).unwrap());
	assert_ne!(a.span(1, 2).unwrap(), a.span(1, 3).unwrap());
}

#[test]
fn sub_span_stays_inside_parent() {
	let s = snap("0123456789");
	let parent = s.span(2, 6).unwrap();
	let child = parent.sub_span(1, 3).unwrap();
	assert_eq!(child.start(), 3);
	assert_eq!(child.text(), "345");
	assert!(parent.strictly_contains(&child));
	assert!(parent.sub_span(4, 3).is_err());
}

#[test]
fn containment_and_overlap() {
	let s = snap("0123456789");
	let outer = s.span(0, 10).unwrap();
	let left = s.span(0, 4).unwrap();
	let right = s.span(4, 4).unwrap();
	assert!(outer.contains(&outer));
	assert!(!outer.strictly_contains(&outer));
	assert!(!left.overlaps(&right));
	assert!(outer.overlaps(&right));
}

#[test]
fn intersection_clamps_to_both() {
	let s = snap("0123456789");
	let a = s.span(2, 5).unwrap();
	let b = s.span(5, 4).unwrap();
	assert_eq!(a.intersection(&b), Some(s.span(5, 2).unwrap()));
	assert_eq!(a.intersection(&s.span(7, 2).unwrap()), None);
}

#[test]
fn empty_span() {
	let s = snap("");
	let span = s.full_span();
	assert!(span.is_empty());
	assert_eq!(span.text(), "");
}
