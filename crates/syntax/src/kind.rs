use std::fmt;

/// Semantic kind attached to a classified span.
///
/// Kinds form a shallow hierarchy: a kind "is of type" itself and of every
/// kind on its [`base`](Self::base) chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationKind {
	Text,
	Comment,
	/// A `TODO` marker inside a comment. Based on [`Comment`](Self::Comment).
	TodoComment,
	Keyword,
	Identifier,
	String,
	Number,
	Operator,
	/// Any upstream kind this crate has no use for.
	Other(&'static str),
}

impl ClassificationKind {
	pub fn name(self) -> &'static str {
		match self {
			ClassificationKind::Text => "text",
			ClassificationKind::Comment => "comment",
			ClassificationKind::TodoComment => "todo-comment",
			ClassificationKind::Keyword => "keyword",
			ClassificationKind::Identifier => "identifier",
			ClassificationKind::String => "string",
			ClassificationKind::Number => "number",
			ClassificationKind::Operator => "operator",
			ClassificationKind::Other(name) => name,
		}
	}

	/// The kind this one derives from, if any.
	pub fn base(self) -> Option<Self> {
		match self {
			ClassificationKind::TodoComment => Some(ClassificationKind::Comment),
			_ => None,
		}
	}

	/// True if `self` is `other` or derives from it.
	pub fn is_of_type(self, other: Self) -> bool {
		let mut current = Some(self);
		while let Some(kind) = current {
			if kind == other {
				return true;
			}
			current = kind.base();
		}
		false
	}

	pub fn is_comment(self) -> bool {
		self.is_of_type(ClassificationKind::Comment)
	}
}

impl fmt::Display for ClassificationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
