use crate::{candidate::Candidate, mode::Mode, source::SourceKind, url};

/// Whether `candidate`, sitting at index 0 of a list of `result_count` rows, may be selected
/// without user input.
pub fn is_auto_select_eligible(
	candidate: &Candidate,
	query: &str,
	result_count: usize,
	mode: &Mode,
) -> bool {
	if query.is_empty() {
		return false;
	}

	match candidate.kind() {
		SourceKind::Mnemonic => true,
		SourceKind::TopDomain => starts_with_ignore_case(candidate.text(), query),
		SourceKind::History
		| SourceKind::Url
		| SourceKind::Note
		| SourceKind::Tab
		| SourceKind::TabGroup => candidate.is_take_over(),
		SourceKind::SearchEngine =>
			(candidate.is_take_over() && candidate.url().is_some())
				|| (result_count == 2 && !url::looks_like_url(query) && candidate.text() == query),
		SourceKind::CreateNote => matches!(mode, Mode::NoteCreation),
		SourceKind::Action => false,
	}
}

/// Sources whose text may be completed inline after the typed prefix.
pub fn is_prefix_completable(kind: SourceKind) -> bool {
	matches!(
		kind,
		SourceKind::History
			| SourceKind::Url
			| SourceKind::Tab
			| SourceKind::TopDomain
			| SourceKind::Mnemonic
	)
}

pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
	let mut text = text.chars().flat_map(char::to_lowercase);

	prefix.chars().flat_map(char::to_lowercase).all(|p| text.next() == Some(p))
}
