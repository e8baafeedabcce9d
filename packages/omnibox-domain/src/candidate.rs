use std::cmp::Ordering;

use uuid::Uuid;

use crate::{
	action::CommitAction,
	scorer::{self, ScoreRequest, Scores},
	source::{Source, SourceKind, UrlFields},
};

/// Identity used for dedup: the same entity completing a different fragment is a
/// different candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateId {
	pub uuid: Uuid,
	pub completing_text: String,
}

/// One ranked completion. Immutable once built; use [`Candidate::with_overrides`] to derive a
/// copy for a new context.
#[derive(Debug, Clone)]
pub struct Candidate {
	text: String,
	information: Option<String>,
	source: Source,
	url: Option<String>,
	alias_destination: Option<String>,
	url_fields: UrlFields,
	completing_text: Option<String>,
	base_score: Option<f64>,
	scores: Scores,
	uuid: Uuid,
	shortcut: Option<String>,
	action: Option<CommitAction>,
}

#[derive(Debug, Clone)]
pub struct CandidateBuilder {
	text: String,
	information: Option<String>,
	source: Source,
	url: Option<String>,
	alias_destination: Option<String>,
	url_fields: UrlFields,
	completing_text: Option<String>,
	base_score: Option<f64>,
	uuid: Option<Uuid>,
	shortcut: Option<String>,
	action: Option<CommitAction>,
}

/// Fields a derived copy may replace. Scores and display strings are always carried over.
#[derive(Debug, Clone, Default)]
pub struct CandidateOverrides {
	pub source: Option<Source>,
	pub shortcut: Option<String>,
	pub action: Option<CommitAction>,
	pub base_score: Option<f64>,
}

impl Candidate {
	pub fn builder(text: impl Into<String>, source: Source) -> CandidateBuilder {
		CandidateBuilder {
			text: text.into(),
			information: None,
			source,
			url: None,
			alias_destination: None,
			url_fields: UrlFields::NONE,
			completing_text: None,
			base_score: None,
			uuid: None,
			shortcut: None,
			action: None,
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn information(&self) -> Option<&str> {
		self.information.as_deref()
	}

	pub fn source(&self) -> &Source {
		&self.source
	}

	pub fn kind(&self) -> SourceKind {
		self.source.kind()
	}

	pub fn url(&self) -> Option<&str> {
		self.url.as_deref()
	}

	pub fn alias_destination(&self) -> Option<&str> {
		self.alias_destination.as_deref()
	}

	pub fn url_fields(&self) -> UrlFields {
		self.url_fields
	}

	pub fn completing_text(&self) -> Option<&str> {
		self.completing_text.as_deref()
	}

	pub fn base_score(&self) -> Option<f64> {
		self.base_score
	}

	pub fn scores(&self) -> &Scores {
		&self.scores
	}

	pub fn prefix_score(&self) -> f64 {
		self.scores.prefix
	}

	pub fn weighted_score(&self) -> f64 {
		self.base_score.unwrap_or(1.0) * self.scores.prefix
	}

	pub fn is_take_over(&self) -> bool {
		self.scores.take_over
	}

	pub fn uuid(&self) -> Uuid {
		self.uuid
	}

	pub fn shortcut(&self) -> Option<&str> {
		self.shortcut.as_deref()
	}

	pub fn action(&self) -> Option<&CommitAction> {
		self.action.as_ref()
	}

	pub fn id(&self) -> CandidateId {
		CandidateId {
			uuid: self.uuid,
			completing_text: self.completing_text.clone().unwrap_or_default(),
		}
	}

	fn info_wins(&self) -> bool {
		!self.kind().is_note_bearing() && self.scores.raw_info > self.scores.raw_text
	}

	/// Main line to render: the information field when it matched strictly better.
	pub fn display_text(&self) -> &str {
		if self.info_wins() { self.information.as_deref().unwrap_or(&self.text) } else { &self.text }
	}

	pub fn display_information(&self) -> Option<&str> {
		if self.info_wins() { Some(&self.text) } else { self.information.as_deref() }
	}

	/// Copy into a new context without rescoring.
	pub fn with_overrides(&self, overrides: CandidateOverrides) -> Self {
		let mut copy = self.clone();

		if let Some(source) = overrides.source {
			copy.source = source;
		}
		if overrides.shortcut.is_some() {
			copy.shortcut = overrides.shortcut;
		}
		if overrides.action.is_some() {
			copy.action = overrides.action;
		}
		if overrides.base_score.is_some() {
			copy.base_score = overrides.base_score;
		}

		copy
	}

	/// Ranking order. `Ordering::Greater` means `self` belongs higher in the list.
	pub fn rank_cmp(&self, other: &Self) -> Ordering {
		let by_score = self.weighted_score().total_cmp(&other.weighted_score());

		if by_score != Ordering::Equal {
			return by_score;
		}

		let by_defined = self.base_score.is_some().cmp(&other.base_score.is_some());

		if by_defined != Ordering::Equal {
			return by_defined;
		}

		let self_url = self.url_fields.contains(UrlFields::TEXT);
		let other_url = other.url_fields.contains(UrlFields::TEXT);

		match (self_url, other_url) {
			(true, true) => other
				.text
				.chars()
				.count()
				.cmp(&self.text.chars().count())
				.then_with(|| other.text.cmp(&self.text)),
			(false, false) => self.text.cmp(&other.text),
			(true, false) => Ordering::Greater,
			(false, true) => Ordering::Less,
		}
	}
}

impl PartialEq for Candidate {
	fn eq(&self, other: &Self) -> bool {
		self.uuid == other.uuid && self.completing_text == other.completing_text
	}
}

impl CandidateBuilder {
	pub fn information(mut self, information: impl Into<String>) -> Self {
		self.information = Some(information.into());

		self
	}

	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	pub fn alias_destination(mut self, destination: impl Into<String>) -> Self {
		self.alias_destination = Some(destination.into());

		self
	}

	pub fn url_fields(mut self, url_fields: UrlFields) -> Self {
		self.url_fields = url_fields;

		self
	}

	pub fn completing_text(mut self, fragment: impl Into<String>) -> Self {
		self.completing_text = Some(fragment.into());

		self
	}

	pub fn base_score(mut self, score: Option<f64>) -> Self {
		self.base_score = score;

		self
	}

	pub fn uuid(mut self, uuid: Uuid) -> Self {
		self.uuid = Some(uuid);

		self
	}

	pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
		self.shortcut = Some(shortcut.into());

		self
	}

	pub fn action(mut self, action: CommitAction) -> Self {
		self.action = Some(action);

		self
	}

	pub fn build(self) -> Candidate {
		let scored = scorer::score(ScoreRequest {
			text: &self.text,
			information: self.information.as_deref(),
			fragment: self.completing_text.as_deref(),
			kind: self.source.kind(),
			url_fields: self.url_fields,
		});

		Candidate {
			text: scored.text,
			information: scored.information,
			source: self.source,
			url: self.url,
			alias_destination: self.alias_destination,
			url_fields: self.url_fields,
			completing_text: self.completing_text,
			base_score: self.base_score,
			scores: scored.scores,
			uuid: self.uuid.unwrap_or_else(Uuid::new_v4),
			shortcut: self.shortcut,
			action: self.action,
		}
	}
}

/// Sorts best first. Stable, so equal candidates keep their input order.
pub fn sort_descending(candidates: &mut [Candidate]) {
	candidates.sort_by(|a, b| b.rank_cmp(a));
}
