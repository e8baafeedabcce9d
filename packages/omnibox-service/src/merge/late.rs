use ahash::AHashSet;

use omnibox_domain::{Candidate, Source, SourceKind};

use crate::merge::dedup;

#[derive(Debug, Clone)]
pub struct LateInsertion {
	pub results: Vec<Candidate>,
	/// Index of the first inserted row.
	pub index: usize,
	pub inserted: usize,
}

/// Splices search suggestions that missed the deadline into an already shown list.
pub fn insert_search_engine_results(
	current: &[Candidate],
	late: Vec<Candidate>,
	selected: Option<usize>,
	limit: usize,
	min_capacity: usize,
) -> LateInsertion {
	let shown: AHashSet<&str> = current
		.iter()
		.filter(|candidate| candidate.kind() == SourceKind::SearchEngine)
		.map(Candidate::text)
		.collect();
	let mut fresh: Vec<Candidate> = dedup::unique_search_rows(late)
		.into_iter()
		.filter(|candidate| !shown.contains(candidate.text()))
		.collect();
	let capacity = min_capacity.max(limit.saturating_sub(current.len()));

	fresh.truncate(capacity);

	let index = current
		.iter()
		.rposition(|candidate| candidate.source().outranks(&Source::SearchEngine))
		.map(|last| last + 1)
		.or_else(|| selected.map(|at| (at + 1).min(current.len())))
		.unwrap_or(0);
	let inserted = fresh.len();
	let mut results = Vec::with_capacity(current.len() + inserted);

	results.extend_from_slice(&current[..index]);
	results.extend(fresh);
	results.extend_from_slice(&current[index..]);

	LateInsertion { results, index, inserted }
}
