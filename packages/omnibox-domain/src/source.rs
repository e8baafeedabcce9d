use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tab group as referenced by sources and by the tab-group mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabGroupRef {
	pub id: Uuid,
	pub title: String,
}

/// Where a candidate came from. Associated values never take part in ranking; use
/// [`Source::kind`] and [`SourceKind::priority`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
	History,
	Note { note_id: Option<Uuid>, element_id: Option<Uuid> },
	SearchEngine,
	Url,
	Tab { tab_id: Option<Uuid> },
	CreateNote,
	TopDomain,
	Mnemonic,
	Action,
	TabGroup { group: Option<TabGroupRef> },
}

/// Fieldless view of [`Source`], used to bucket batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
	History,
	Note,
	SearchEngine,
	Url,
	Tab,
	CreateNote,
	TopDomain,
	Mnemonic,
	Action,
	TabGroup,
}

impl Source {
	pub fn note() -> Self {
		Self::Note { note_id: None, element_id: None }
	}

	pub fn note_with_id(note_id: Uuid) -> Self {
		Self::Note { note_id: Some(note_id), element_id: None }
	}

	pub fn kind(&self) -> SourceKind {
		match self {
			Self::History => SourceKind::History,
			Self::Note { .. } => SourceKind::Note,
			Self::SearchEngine => SourceKind::SearchEngine,
			Self::Url => SourceKind::Url,
			Self::Tab { .. } => SourceKind::Tab,
			Self::CreateNote => SourceKind::CreateNote,
			Self::TopDomain => SourceKind::TopDomain,
			Self::Mnemonic => SourceKind::Mnemonic,
			Self::Action => SourceKind::Action,
			Self::TabGroup { .. } => SourceKind::TabGroup,
		}
	}

	pub fn priority(&self) -> u8 {
		self.kind().priority()
	}

	/// True when `self` is strictly more important than `other`.
	pub fn outranks(&self, other: &Self) -> bool {
		self.priority() < other.priority()
	}
}

impl SourceKind {
	/// Lower value means more important. Independent of declaration order.
	pub fn priority(self) -> u8 {
		match self {
			Self::History => 0,
			Self::Url | Self::Tab => 1,
			Self::Note | Self::TabGroup => 2,
			Self::SearchEngine => 3,
			Self::Action | Self::CreateNote => 4,
			Self::TopDomain | Self::Mnemonic => 5,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::History => "history",
			Self::Note => "note",
			Self::SearchEngine => "search_engine",
			Self::Url => "url",
			Self::Tab => "tab",
			Self::CreateNote => "create_note",
			Self::TopDomain => "top_domain",
			Self::Mnemonic => "mnemonic",
			Self::Action => "action",
			Self::TabGroup => "tab_group",
		}
	}

	/// Sources whose display text must never be trimmed to the matched substring.
	pub fn allows_base_replacement(self) -> bool {
		!matches!(
			self,
			Self::Note | Self::CreateNote | Self::SearchEngine | Self::TabGroup | Self::Action
		)
	}

	/// Note-bearing fields are weighted like URL fields by the scorer.
	pub fn is_note_bearing(self) -> bool {
		matches!(self, Self::Note | Self::CreateNote)
	}
}

impl std::fmt::Display for SourceKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Which of the candidate's string fields hold a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UrlFields(u8);
impl UrlFields {
	pub const NONE: Self = Self(0);
	pub const TEXT: Self = Self(1 << 0);
	pub const INFO: Self = Self(1 << 1);

	pub fn contains(self, other: Self) -> bool {
		other.0 != 0 && self.0 & other.0 == other.0
	}

	pub fn union(self, other: Self) -> Self {
		Self(self.0 | other.0)
	}

	pub fn is_empty(self) -> bool {
		self.0 == 0
	}
}

impl std::ops::BitOr for UrlFields {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		self.union(rhs)
	}
}
