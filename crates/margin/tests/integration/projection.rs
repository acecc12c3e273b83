use pretty_assertions::assert_eq;
use rstest::rstest;
use todomark_config::Config;
use todomark_margin::SnapshotStamp;
use todomark_primitives::Rgb;

use crate::common::{Harness, TRACK_HEIGHT, all_comment, document};

#[rstest]
#[case::todo_comment("// TODO: fix this", vec![0])]
#[case::no_token("x = 1; // not a marker", vec![])]
#[case::token_in_code_before_comment("TODO(x); // later", vec![])]
#[case::token_in_code_with_comment("let TODO = 1; // note", vec![0])]
#[case::crlf_lines("// TODO\r\nx\r\n// TODO", vec![0, 2])]
#[case::empty_document("", vec![])]
fn marks_lines_with_todo_comments(#[case] text: &str, #[case] expected: Vec<usize>) {
	let harness = Harness::new(text);
	assert_eq!(harness.layout(), 1);
	assert_eq!(harness.marked_lines(), expected);
}

#[test]
fn token_at_line_start_is_not_marked() {
	let harness = Harness::with_upstream("TODO at start", all_comment());
	harness.layout();

	let markers = harness.margin.markers().unwrap();
	assert!(markers.is_empty());
	assert_eq!(markers.stamp, Some(SnapshotStamp::of(&harness.buffer.snapshot())));
}

#[test]
fn line_start_rule_applies_per_line() {
	let harness = Harness::with_upstream("TODO: first\n# TODO: second", all_comment());
	harness.layout();
	assert_eq!(harness.marked_lines(), vec![1]);
}

#[test]
fn markers_follow_line_order() {
	let harness = Harness::new(&document(10, &[0, 4, 9]));
	harness.layout();

	assert_eq!(harness.marked_lines(), vec![0, 4, 9]);
	// Each of the ten lines owns 10px of the strip; tops are padded by -2 and offset by 3.
	assert_eq!(harness.marker_tops(), vec![1.0, 36.0, 86.0]);
	let tops = harness.marker_tops();
	assert!(tops.windows(2).all(|pair| pair[0] < pair[1]));
	assert!(tops.iter().all(|top| *top < TRACK_HEIGHT));
}

#[test]
fn markers_use_default_shape() {
	let harness = Harness::new("// TODO");
	harness.layout();

	let markers = harness.margin.markers().unwrap();
	let shape = markers.shapes[0];
	assert_eq!((shape.left, shape.width, shape.height), (1.0, 6.0, 6.0));
	assert_eq!(shape.fill, Rgb::new(244, 244, 244));
	assert!(!shape.hit_test_visible);
}

#[test]
fn configured_options_shape_markers() {
	let config = Config::parse(
		r##"
margin {
    width 14
    marker-size 8
    marker-left 3
    fill "#ff0000"
}
"##,
	)
	.unwrap();
	let harness = Harness::with_options("// TODO", config.margin);
	harness.layout();

	assert_eq!(harness.margin.margin_size(), Ok(14.0));
	let markers = harness.margin.markers().unwrap();
	let shape = markers.shapes[0];
	assert_eq!((shape.left, shape.width, shape.height), (3.0, 8.0, 8.0));
	assert_eq!(shape.fill, Rgb::new(255, 0, 0));
}

#[test]
fn unmappable_line_is_skipped() {
	let harness = Harness::with_unmappable_line(&document(5, &[1, 3]), 1);
	harness.layout();

	assert_eq!(harness.marked_lines(), vec![3]);
	assert_eq!(harness.surface.sets.borrow().len(), 1);
}

#[test]
fn rebuild_replaces_previous_markers() {
	let mut harness = Harness::new(&document(4, &[0, 2]));
	harness.layout();
	assert_eq!(harness.marked_lines(), vec![0, 2]);

	harness.edit(&document(4, &[3]));
	harness.layout();
	assert_eq!(harness.marked_lines(), vec![3]);

	let sets = harness.surface.sets.borrow();
	let versions: Vec<u64> = sets.iter().filter_map(|set| set.stamp.map(|s| s.version)).collect();
	assert_eq!(versions, vec![0, 1]);
}

#[test]
fn older_snapshot_is_ignored() {
	let mut harness = Harness::new("// TODO");
	let old = harness.buffer.snapshot();
	harness.edit("x\n// TODO");
	harness.layout();
	assert_eq!(harness.marked_lines(), vec![1]);

	harness.layout_snapshot(&old);

	assert_eq!(harness.marked_lines(), vec![1]);
	let stamp = harness.margin.markers().unwrap().stamp.unwrap();
	assert_eq!(stamp.version, 1);
	assert_eq!(harness.surface.sets.borrow().len(), 1);
}

#[test]
fn same_snapshot_twice_gives_same_markers() {
	let harness = Harness::new(&document(6, &[2, 5]));
	harness.layout();
	let first = harness.margin.markers().unwrap();
	harness.layout();

	assert_eq!(harness.margin.markers().unwrap(), first);
	assert_eq!(harness.surface.sets.borrow().len(), 2);
}
