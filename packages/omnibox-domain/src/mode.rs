use crate::source::TabGroupRef;

/// What the omnibox is currently being used for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	General,
	NoteCreation,
	TabGroup(TabGroupRef),
	CustomView,
}
impl Mode {
	/// Only the general mode may leave the list without a selected row.
	pub fn allows_no_selection(&self) -> bool {
		matches!(self, Self::General)
	}

	pub fn expects_search_engine(&self, is_private: bool) -> bool {
		matches!(self, Self::General) && !is_private
	}

	pub fn limit(&self, cfg: &omnibox_config::Omnibox) -> usize {
		match self {
			Self::TabGroup(_) => cfg.tab_group_limit,
			_ => cfg.default_limit,
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::General => "general",
			Self::NoteCreation => "note_creation",
			Self::TabGroup(_) => "tab_group",
			Self::CustomView => "custom_view",
		}
	}
}
