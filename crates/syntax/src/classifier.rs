use todomark_primitives::SnapshotSpan;

use crate::kind::ClassificationKind;

/// A span tagged with a classification kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSpan {
	pub span: SnapshotSpan,
	pub kind: ClassificationKind,
}

impl ClassifiedSpan {
	pub fn new(span: SnapshotSpan, kind: ClassificationKind) -> Self {
		Self { span, kind }
	}
}

/// Produces classifications for spans of a snapshot.
///
/// Implementations must be callable repeatedly with the same span and return
/// the same result while the snapshot is unchanged. Output is ordered by
/// span start.
pub trait Classifier {
	fn classify(&self, span: &SnapshotSpan) -> Vec<ClassifiedSpan>;
}

impl<F> Classifier for F
where
	F: Fn(&SnapshotSpan) -> Vec<ClassifiedSpan>,
{
	fn classify(&self, span: &SnapshotSpan) -> Vec<ClassifiedSpan> {
		self(span)
	}
}
