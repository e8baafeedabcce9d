use ahash::{AHashMap, AHashSet};
use uuid::Uuid;

use omnibox_domain::{Candidate, CandidateOverrides, UrlFields, url};

/// Canonical URL used for dedup. Aliases are keyed by their destination.
pub fn url_key(candidate: &Candidate) -> Option<String> {
	candidate
		.alias_destination()
		.or(candidate.url())
		.or_else(|| candidate.url_fields().contains(UrlFields::TEXT).then(|| candidate.text()))
		.map(url::canonical_url_key)
}

/// Key used to decide whether two rows show the same thing.
pub fn text_key(candidate: &Candidate) -> String {
	url::canonical_url_key(candidate.url().unwrap_or(candidate.text()))
}

/// Drops later notes repeating the text or the note of an earlier one.
pub fn unique_notes(notes: Vec<Candidate>) -> Vec<Candidate> {
	let mut seen_text: AHashSet<String> = AHashSet::new();
	let mut seen_uuid: AHashSet<Uuid> = AHashSet::new();

	notes
		.into_iter()
		.filter(|note| seen_text.insert(note.text().to_string()) && seen_uuid.insert(note.uuid()))
		.collect()
}

/// Collapses candidates sharing a URL key. The survivor keeps the slot of the first occurrence.
pub fn unique_by_url(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
	let mut out: Vec<Candidate> = Vec::new();
	let mut slots: AHashMap<String, usize> = AHashMap::new();

	for candidate in candidates {
		let Some(key) = url_key(&candidate) else {
			out.push(candidate);

			continue;
		};

		match slots.get(&key) {
			Some(&at) =>
				if url_challenger_wins(&candidate, &out[at]) {
					out[at] = candidate;
				},
			None => {
				slots.insert(key, out.len());
				out.push(candidate);
			},
		}
	}

	out
}

fn url_challenger_wins(challenger: &Candidate, incumbent: &Candidate) -> bool {
	let (challenger_priority, incumbent_priority) =
		(challenger.source().priority(), incumbent.source().priority());

	challenger_priority < incumbent_priority
		|| (challenger_priority == incumbent_priority
			&& challenger.weighted_score() > incumbent.weighted_score())
}

/// Replaces URL candidates that are already open in a tab by a tab-flavoured copy, then appends
/// the remaining tabs.
pub fn merge_open_tabs(urls: Vec<Candidate>, tabs: Vec<Candidate>) -> Vec<Candidate> {
	let mut tab_slots: AHashMap<String, usize> = AHashMap::new();
	let mut open: Vec<Option<Candidate>> = Vec::with_capacity(tabs.len());

	for tab in tabs {
		if let Some(key) = url_key(&tab) {
			if tab_slots.contains_key(&key) {
				continue;
			}

			tab_slots.insert(key, open.len());
		}

		open.push(Some(tab));
	}

	let mut out: Vec<Candidate> = urls
		.into_iter()
		.map(|candidate| {
			let tab = url_key(&candidate)
				.and_then(|key| tab_slots.get(&key).copied())
				.and_then(|at| open[at].take());

			match tab {
				Some(tab) => candidate.with_overrides(CandidateOverrides {
					source: Some(tab.source().clone()),
					shortcut: tab.shortcut().map(str::to_string),
					action: tab.action().cloned(),
					base_score: max_score(candidate.base_score(), tab.base_score()),
				}),
				None => candidate,
			}
		})
		.collect();

	out.extend(open.into_iter().flatten());

	out
}

/// Keeps one search row per `text + information`, preferring a defined then a higher score.
pub fn unique_search_rows(rows: Vec<Candidate>) -> Vec<Candidate> {
	let mut out: Vec<Candidate> = Vec::new();
	let mut slots: AHashMap<String, usize> = AHashMap::new();

	for row in rows {
		let key = format!("{}{}", row.text(), row.information().unwrap_or_default());

		match slots.get(&key) {
			Some(&at) =>
				if search_challenger_wins(&row, &out[at]) {
					out[at] = row;
				},
			None => {
				slots.insert(key, out.len());
				out.push(row);
			},
		}
	}

	out
}

fn search_challenger_wins(challenger: &Candidate, incumbent: &Candidate) -> bool {
	match (challenger.base_score(), incumbent.base_score()) {
		(Some(_), None) => true,
		(None, Some(_)) => false,
		_ => challenger.weighted_score() > incumbent.weighted_score(),
	}
}

fn max_score(a: Option<f64>, b: Option<f64>) -> Option<f64> {
	match (a, b) {
		(Some(a), Some(b)) => Some(a.max(b)),
		(a, b) => a.or(b),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use omnibox_domain::Source;

	fn link(text: &str, source: Source, score: f64) -> Candidate {
		Candidate::builder(text, source)
			.url(format!("https://{text}"))
			.url_fields(UrlFields::TEXT)
			.base_score(Some(score))
			.build()
	}

	#[test]
	fn url_dedup_prefers_source_priority_over_score() {
		let out = unique_by_url([
			link("abc.com", Source::Url, 9.0),
			link("www.abc.com/", Source::History, 1.0),
		]);

		assert_eq!(out.len(), 1);
		assert_eq!(out[0].source(), &Source::History);
	}

	#[test]
	fn alias_collapses_into_its_destination() {
		let destination = link("beamapp.co", Source::History, 2.0);
		let alias = Candidate::builder("bit.ly/beam", Source::History)
			.url("https://bit.ly/beam")
			.alias_destination("https://beamapp.co/")
			.url_fields(UrlFields::TEXT)
			.base_score(Some(1.0))
			.build();
		let out = unique_by_url([destination, alias]);

		assert_eq!(out.len(), 1);
		assert_eq!(out[0].text(), "beamapp.co");
	}

	#[test]
	fn notes_dedup_on_text_or_uuid() {
		let id = Uuid::new_v4();
		let first = Candidate::builder("Rust", Source::note()).uuid(id).build();
		let same_note = Candidate::builder("Rust (block)", Source::note()).uuid(id).build();
		let same_title = Candidate::builder("Rust", Source::note()).build();
		let other = Candidate::builder("Go", Source::note()).build();
		let out = unique_notes(vec![first, same_note, same_title, other]);

		assert_eq!(out.iter().map(Candidate::text).collect::<Vec<_>>(), vec!["Rust", "Go"]);
	}

	#[test]
	fn search_rows_keep_the_scored_duplicate_in_place() {
		let unscored = Candidate::builder("rust", Source::SearchEngine).build();
		let other = Candidate::builder("rust book", Source::SearchEngine).build();
		let scored =
			Candidate::builder("rust", Source::SearchEngine).base_score(Some(0.5)).build();
		let out = unique_search_rows(vec![unscored, other, scored]);

		assert_eq!(out.len(), 2);
		assert_eq!(out[0].base_score(), Some(0.5));
		assert_eq!(out[1].text(), "rust book");
	}
}
