//! Display format for classification kinds.

use todomark_primitives::Rgb;

use crate::kind::ClassificationKind;

/// How a host should paint spans of one classification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationFormat {
	pub kind: ClassificationKind,
	/// Human-readable name shown in the host's theme settings.
	pub display_name: &'static str,
	pub background: Option<Rgb>,
	/// Whether users may override the background.
	pub background_customizable: bool,
	/// The format is layered on top of this kind's format.
	pub base: Option<ClassificationKind>,
	/// The format is applied after this kind's format.
	pub order_after: Option<ClassificationKind>,
	/// Whether the format is listed in user-facing settings.
	pub user_visible: bool,
}

/// Format for [`ClassificationKind::TodoComment`]: a light grey background on top of comments.
pub const TODO_COMMENT_FORMAT: ClassificationFormat = ClassificationFormat {
	kind: ClassificationKind::TodoComment,
	display_name: "todo comment",
	background: Some(Rgb::new(244, 244, 244)),
	background_customizable: false,
	base: Some(ClassificationKind::Comment),
	order_after: Some(ClassificationKind::Comment),
	user_visible: true,
};
