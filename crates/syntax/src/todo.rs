//! The todo-comment classifier.
//!
//! [`TodoClassifier`] does not tokenize anything itself. It asks an upstream
//! classifier where the comments are and emits a
//! [`ClassificationKind::TodoComment`] span over the `TODO` token when a
//! comment was reported.
//!
//! With [`MatchScope::Span`] the token is searched in the text of the whole
//! requested span, once per call, so at most one span is emitted. The token
//! does not have to lie inside the comment fragment in that mode. With
//! [`MatchScope::Comment`] each comment fragment is searched separately and
//! every match lies inside its fragment.
//!
//! In both modes a token sitting at the very first character of the requested
//! span is not reported.
//!
//! Callers that need every todo span to lie inside a comment span must use
//! [`MatchScope::Comment`].

use std::rc::Rc;

use todomark_config::{ClassifierOptions, MatchScope};
use todomark_primitives::{CharIdx, SnapshotSpan};

use crate::classifier::{ClassifiedSpan, Classifier};
use crate::guard::BusyFlag;
use crate::kind::ClassificationKind;
use crate::marker::{self, TODO_TOKEN_LEN};

/// Classifier emitting `TodoComment` spans on top of an upstream classifier.
pub struct TodoClassifier {
	upstream: Rc<dyn Classifier>,
	scope: MatchScope,
	busy: BusyFlag,
}

impl TodoClassifier {
	pub fn new(upstream: Rc<dyn Classifier>, options: ClassifierOptions) -> Self {
		Self {
			upstream,
			scope: options.scope,
			busy: BusyFlag::new(),
		}
	}

	/// True while a classification on this instance is running.
	pub fn is_busy(&self) -> bool {
		self.busy.is_busy()
	}

	fn classify_span(&self, span: &SnapshotSpan) -> Vec<ClassifiedSpan> {
		if span.is_empty() {
			return Vec::new();
		}

		let upstream = self.upstream.classify(span);
		let mut comments = upstream.iter().filter(|c| c.kind.is_comment()).peekable();
		if comments.peek().is_none() {
			return Vec::new();
		}

		match self.scope {
			MatchScope::Span => marker::marker_offset(&span.text())
				.and_then(|offset| todo_span(span, offset))
				.into_iter()
				.collect(),
			MatchScope::Comment => {
				let mut found: Vec<ClassifiedSpan> = Vec::new();
				for comment in comments {
					let Some(fragment) = span.intersection(&comment.span) else {
						continue;
					};
					let Some(local) = marker::find_token(&fragment.text()) else {
						continue;
					};
					let offset = fragment.start() - span.start() + local;
					if offset == 0 || found.iter().any(|s| s.span.start() == span.start() + offset) {
						continue;
					}
					found.extend(todo_span(span, offset));
				}
				found
			}
		}
	}
}

impl Classifier for TodoClassifier {
	fn classify(&self, span: &SnapshotSpan) -> Vec<ClassifiedSpan> {
		let Some(_busy) = self.busy.try_enter() else {
			tracing::trace!(?span, "Ignoring re-entrant todo classification");
			return Vec::new();
		};
		self.classify_span(span)
	}
}

/// The token span at `offset` chars into `span`.
fn todo_span(span: &SnapshotSpan, offset: CharIdx) -> Option<ClassifiedSpan> {
	span.sub_span(offset, TODO_TOKEN_LEN)
		.ok()
		.map(|token| ClassifiedSpan::new(token, ClassificationKind::TodoComment))
}
