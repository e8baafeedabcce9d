//! Selected row tracking and the text-field state derived from it.
//!
//! Indices are always checked against the current list; a stale index never panics, it just
//! selects nothing.

use std::ops::Range;

use omnibox_domain::{
	Candidate, Mode, SourceKind, UrlFields,
	autoselect::{self, starts_with_ignore_case},
	url,
};

/// What the text field shows. `selected_range` is in chars and marks the inline completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFieldState {
	pub text: String,
	pub selected_range: Option<Range<usize>>,
}
impl TextFieldState {
	pub fn plain(text: impl Into<String>) -> Self {
		Self { text: text.into(), selected_range: None }
	}

	/// Text before the inline completion, i.e. what the user actually typed.
	pub fn unselected_prefix(&self) -> String {
		match &self.selected_range {
			Some(range) if range.start > 0 => self.text.chars().take(range.start).collect(),
			_ => self.text.clone(),
		}
	}

	pub fn selected_text(&self) -> Option<String> {
		let range = self.selected_range.as_ref().filter(|range| range.start > 0)?;

		(range.end <= self.text.chars().count())
			.then(|| self.text.chars().skip(range.start).take(range.end - range.start).collect())
	}
}

/// Inputs to [`Selection::reconcile`].
pub struct Reconcile<'a> {
	pub results: &'a [Candidate],
	pub query: &'a str,
	pub mode: &'a Mode,
	/// False while the user is deleting characters.
	pub allow_auto_select: bool,
	/// Search row kept selected across the keystroke.
	pub sticky_search_text: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
	selected: Option<usize>,
}
impl Selection {
	pub fn selected(&self) -> Option<usize> {
		self.selected
	}

	pub fn selected_in<'a>(&self, results: &'a [Candidate]) -> Option<&'a Candidate> {
		self.selected.and_then(|at| results.get(at))
	}

	pub fn select(&mut self, index: usize, count: usize) {
		if index < count {
			self.selected = Some(index);
		}
	}

	pub fn select_next(&mut self, count: usize) {
		if count == 0 {
			return;
		}

		self.selected = Some(match self.selected {
			Some(at) if at + 1 < count => at + 1,
			_ => 0,
		});
	}

	pub fn select_previous(&mut self, count: usize) {
		if count == 0 {
			return;
		}

		self.selected = Some(match self.selected {
			None => 0,
			Some(0) => count - 1,
			Some(at) => (at - 1).min(count - 1),
		});
	}

	/// Back to the resting state: nothing in the general mode, the first row elsewhere.
	pub fn reset(&mut self, mode: &Mode, count: usize) {
		self.selected = if mode.allows_no_selection() || count == 0 { None } else { Some(0) };
	}

	/// Shifts the selection after `inserted` rows were spliced in at `index`.
	pub fn shift_after_insert(&mut self, index: usize, inserted: usize) {
		if let Some(at) = self.selected.as_mut()
			&& *at >= index
		{
			*at += inserted;
		}
	}

	/// Reapplies the selection rules to a freshly replaced list. Returns the text-field state
	/// to show when it changes.
	pub fn reconcile(&mut self, args: Reconcile<'_>) -> Option<TextFieldState> {
		let count = args.results.len();
		let top = args.results.first();

		if args.allow_auto_select
			&& let Some(top) = top
			&& autoselect::is_auto_select_eligible(top, args.query, count, args.mode)
		{
			self.selected = Some(0);

			return Some(
				inline_completion(top, args.query)
					.unwrap_or_else(|| TextFieldState::plain(args.query)),
			);
		}

		if let Some(sticky) = args.sticky_search_text
			&& let Some(at) = args.results.iter().position(|candidate| {
				candidate.kind() == SourceKind::SearchEngine
					&& candidate.text() == sticky
			}) {
			self.selected = Some(at);

			return None;
		}

		if self.selected == Some(0) {
			self.reset(args.mode, count);

			return Some(TextFieldState::plain(args.query));
		}

		match self.selected {
			Some(at) if at >= count => self.reset(args.mode, count),
			None if !args.mode.allows_no_selection() => self.reset(args.mode, count),
			_ => {},
		}

		None
	}
}

/// Text shown when `candidate` is selected: its address for URL rows, its title otherwise.
pub fn committed_text(candidate: &Candidate) -> String {
	let url_like = candidate.url_fields().contains(UrlFields::TEXT)
		|| autoselect::is_prefix_completable(candidate.kind());

	if url_like {
		return candidate.url().map(url::url_without_scheme).unwrap_or(candidate.text()).to_string();
	}

	candidate.display_text().to_string()
}

/// `query` followed by the rest of the candidate, the rest marked as selected. `None` when the
/// candidate cannot be completed after what was typed.
pub fn inline_completion(candidate: &Candidate, query: &str) -> Option<TextFieldState> {
	if query.is_empty() || !autoselect::is_prefix_completable(candidate.kind()) {
		return None;
	}

	let target = if candidate.url_fields().contains(UrlFields::TEXT) {
		url::comparable_to(candidate.text(), query)
	} else {
		candidate.text()
	};

	if !starts_with_ignore_case(target, query) {
		return None;
	}

	let typed = query.chars().count();
	let total = target.chars().count();
	let text: String = query.chars().chain(target.chars().skip(typed)).collect();

	Some(TextFieldState { text, selected_range: Some(typed..total) })
}

/// Text-field state when the user moves onto `index`.
pub fn text_field_for(
	results: &[Candidate],
	index: usize,
	query: &str,
	mode: &Mode,
) -> Option<TextFieldState> {
	let candidate = results.get(index)?;

	if index == 0 && autoselect::is_auto_select_eligible(candidate, query, results.len(), mode) {
		if let Some(completion) = inline_completion(candidate, query) {
			return Some(completion);
		}
	}

	Some(TextFieldState::plain(committed_text(candidate)))
}

/// Keeps an inline completion alive while the user types its next character. Returns the
/// typed prefix to query with and the text-field state to show.
pub fn propose_text(current: &TextFieldState, proposed: &str) -> Option<(String, TextFieldState)> {
	let range =
		current.selected_range.clone().filter(|range| range.start > 0 && !range.is_empty())?;
	let selected_text = current.selected_text()?;
	let proposed_chars: Vec<char> = proposed.chars().collect();
	let typed: String = if proposed_chars.len() > range.end {
		// Fast typing can deliver the new character after the still-selected completion.
		proposed_chars[..range.start].iter().chain(&proposed_chars[range.end..]).collect()
	} else {
		proposed.to_string()
	};

	if !starts_with_ignore_case(&current.text, &typed) {
		return None;
	}

	let last_typed = typed.chars().last()?;
	let next_suggested = selected_text.chars().next()?;

	if !last_typed.to_lowercase().eq(next_suggested.to_lowercase()) {
		return None;
	}

	let typed_len = typed.chars().count();
	let total = current.text.chars().count();
	let text: String = typed.chars().chain(current.text.chars().skip(typed_len)).collect();

	Some((typed, TextFieldState { text, selected_range: Some(typed_len..total) }))
}
