//! Turns one generation's batches into the final ordered list under the slot budget.

pub mod budget;
pub mod dedup;
pub mod late;

pub use late::{LateInsertion, insert_search_engine_results};

use ahash::AHashSet;

use omnibox_config::Omnibox;
use omnibox_domain::{Candidate, Mode, SourceKind, autoselect, candidate::sort_descending};

use crate::adapters::Batch;

pub struct MergeInput<'a> {
	pub batches: &'a [Batch],
	pub query: &'a str,
	pub mode: &'a Mode,
	pub limit: usize,
	/// The search-engine adapter missed its deadline and may still answer.
	pub search_engine_expected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MergeOutput {
	pub results: Vec<Candidate>,
	pub can_create_note: bool,
	pub truncate_length: usize,
	pub search_engine_space: usize,
}

#[derive(Default)]
struct Buckets {
	history: Vec<Candidate>,
	urls: Vec<Candidate>,
	notes: Vec<Candidate>,
	tabs: Vec<Candidate>,
	tab_groups: Vec<Candidate>,
	top_domains: Vec<Candidate>,
	mnemonics: Vec<Candidate>,
	recognized_search: Vec<Candidate>,
	search_engine: Vec<Candidate>,
	create_note: Vec<Candidate>,
	actions: Vec<Candidate>,
}
impl Buckets {
	fn fill(batches: &[Batch]) -> Self {
		let mut buckets = Self::default();

		for batch in batches {
			let from_links = matches!(batch.source(), SourceKind::History | SourceKind::Url);

			for candidate in &batch.candidates {
				let bucket = match candidate.kind() {
					SourceKind::SearchEngine if from_links => &mut buckets.recognized_search,
					SourceKind::SearchEngine => &mut buckets.search_engine,
					SourceKind::History => &mut buckets.history,
					SourceKind::Url => &mut buckets.urls,
					SourceKind::Note => &mut buckets.notes,
					SourceKind::Tab => &mut buckets.tabs,
					SourceKind::TabGroup => &mut buckets.tab_groups,
					SourceKind::TopDomain => &mut buckets.top_domains,
					SourceKind::Mnemonic => &mut buckets.mnemonics,
					SourceKind::CreateNote => &mut buckets.create_note,
					SourceKind::Action => &mut buckets.actions,
				};

				bucket.push(candidate.clone());
			}
		}

		buckets
	}
}

pub fn merge(input: &MergeInput<'_>, cfg: &Omnibox) -> MergeOutput {
	let Buckets {
		mut history,
		mut urls,
		mut notes,
		tabs,
		tab_groups,
		top_domains,
		mnemonics,
		mut recognized_search,
		search_engine,
		create_note,
		actions,
	} = Buckets::fill(input.batches);

	sort_descending(&mut history);
	history.truncate(cfg.history_cap);
	sort_descending(&mut urls);
	urls.truncate(cfg.url_cap);

	let mut url_set = dedup::unique_by_url(history.into_iter().chain(urls));

	sort_descending(&mut url_set);

	let url_set = dedup::merge_open_tabs(url_set, tabs);

	notes = dedup::unique_notes(notes);
	sort_descending(&mut notes);
	notes.truncate(cfg.notes_cap);

	let mut sortable: Vec<Candidate> = url_set.into_iter().chain(notes).chain(tab_groups).collect();

	sort_descending(&mut sortable);

	boost(&mut sortable, top_domains.into_iter().next(), input);
	boost(&mut sortable, mnemonics.into_iter().next(), input);

	let shown_urls: AHashSet<String> = sortable.iter().filter_map(dedup::url_key).collect();

	sort_descending(&mut recognized_search);

	let search_rows = dedup::unique_search_rows(
		recognized_search
			.into_iter()
			.chain(search_engine)
			.filter(|row| dedup::url_key(row).is_none_or(|key| !shown_urls.contains(&key)))
			.collect(),
	);
	let can_create_note = !create_note.is_empty();
	let create_note_slot = usize::from(can_create_note && matches!(input.mode, Mode::NoteCreation));
	let search_engine_space = budget::search_engine_space(
		search_rows.len(),
		input.search_engine_expected,
		cfg.search_engine_slots,
		input.limit,
	);
	let truncate_length =
		input.limit.saturating_sub(search_engine_space + create_note_slot + actions.len());
	let (mut results, pulled) =
		budget::truncate_with_note_reserve(sortable, truncate_length, cfg.note_reserve_ratio);

	if pulled > 0 {
		tracing::debug!(pulled, truncate_length, "Matching notes pulled back past the cutoff.");
	}

	let search_engine_max = (truncate_length + search_engine_space).saturating_sub(results.len());
	let insert_at = usize::from(!results.is_empty());

	results.splice(insert_at..insert_at, search_rows.into_iter().take(search_engine_max));
	results.extend(actions);

	if matches!(input.mode, Mode::NoteCreation) {
		results.splice(0..0, create_note);
	} else {
		results.extend(create_note);
	}

	tracing::debug!(
		results = results.len(),
		can_create_note,
		truncate_length,
		search_engine_space,
		"Merge completed."
	);

	MergeOutput { results, can_create_note, truncate_length, search_engine_space }
}

/// Puts a top-domain or mnemonic row first when nothing stronger already leads, or when it
/// replaces a row showing the same address.
fn boost(sortable: &mut Vec<Candidate>, booster: Option<Candidate>, input: &MergeInput<'_>) {
	let Some(booster) = booster else { return };
	let key = dedup::text_key(&booster);

	if let Some(at) = sortable.iter().position(|candidate| dedup::text_key(candidate) == key) {
		sortable.remove(at);
		sortable.insert(0, booster);

		return;
	}

	let strong_leader = sortable.first().is_some_and(|leader| {
		autoselect::is_auto_select_eligible(leader, input.query, sortable.len(), input.mode)
	});

	if !strong_leader {
		sortable.insert(0, booster);
	}
}
