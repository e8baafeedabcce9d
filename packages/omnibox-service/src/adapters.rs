//! Uniform wrappers that turn collaborator hits into scored candidates.
//!
//! Every adapter resolves to a [`Batch`]. Collaborator failures are logged and replaced by an
//! empty batch, so the caller never sees them.

use omnibox_config::{Omnibox, Sources};
use omnibox_domain::{Candidate, Mode, Source, SourceKind, UrlFields, url};

use crate::{Collaborators, LinkHit, NoteHit, QueryContext};

pub const CREATE_NOTE_INFORMATION: &str = "New note";

/// One source query. Declaration order is the order batches are handed to the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdapterKind {
	NotesByTitle,
	NotesByContent,
	RecentNotes,
	CreateNote,
	TopDomain,
	Mnemonic,
	History,
	HistoryAliases,
	Links,
	Tabs,
	TabGroups,
	SearchEngine,
	Actions,
}
impl AdapterKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::NotesByTitle => "notes_by_title",
			Self::NotesByContent => "notes_by_content",
			Self::RecentNotes => "recent_notes",
			Self::CreateNote => "create_note",
			Self::TopDomain => "top_domain",
			Self::Mnemonic => "mnemonic",
			Self::History => "history",
			Self::HistoryAliases => "history_aliases",
			Self::Links => "links",
			Self::Tabs => "tabs",
			Self::TabGroups => "tab_groups",
			Self::SearchEngine => "search_engine",
			Self::Actions => "actions",
		}
	}

	/// Source tag of the batch. Individual candidates may still carry another source, such as
	/// a search results page found in history.
	pub fn source(self) -> SourceKind {
		match self {
			Self::NotesByTitle | Self::NotesByContent | Self::RecentNotes => SourceKind::Note,
			Self::CreateNote => SourceKind::CreateNote,
			Self::TopDomain => SourceKind::TopDomain,
			Self::Mnemonic => SourceKind::Mnemonic,
			Self::History | Self::HistoryAliases => SourceKind::History,
			Self::Links => SourceKind::Url,
			Self::Tabs => SourceKind::Tab,
			Self::TabGroups => SourceKind::TabGroup,
			Self::SearchEngine => SourceKind::SearchEngine,
			Self::Actions => SourceKind::Action,
		}
	}
}

#[derive(Debug, Clone)]
pub struct Batch {
	pub adapter: AdapterKind,
	pub candidates: Vec<Candidate>,
}
impl Batch {
	pub fn empty(adapter: AdapterKind) -> Self {
		Self { adapter, candidates: Vec::new() }
	}

	pub fn source(&self) -> SourceKind {
		self.adapter.source()
	}
}

/// Everything one generation's adapters need, owned so it can be shared across tasks.
#[derive(Clone)]
pub struct AdapterRequest {
	pub query: String,
	pub ctx: QueryContext,
	pub collaborators: Collaborators,
	pub omnibox: Omnibox,
	pub sources: Sources,
}

/// Active adapters for a mode. An empty query in the general mode only shows recent notes
/// and actions.
pub fn plan(mode: &Mode, query: &str, is_private: bool, sources: &Sources) -> Vec<AdapterKind> {
	match mode {
		Mode::General if query.is_empty() => vec![AdapterKind::RecentNotes, AdapterKind::Actions],
		Mode::General => {
			let mut kinds = vec![
				AdapterKind::NotesByTitle,
				AdapterKind::NotesByContent,
				AdapterKind::CreateNote,
				AdapterKind::TopDomain,
			];

			if sources.mnemonics_enabled {
				kinds.push(AdapterKind::Mnemonic);
			}

			kinds.extend([
				AdapterKind::History,
				AdapterKind::HistoryAliases,
				AdapterKind::Links,
				AdapterKind::Tabs,
				AdapterKind::TabGroups,
			]);

			if sources.search_engine_enabled && mode.expects_search_engine(is_private) {
				kinds.push(AdapterKind::SearchEngine);
			}

			kinds.push(AdapterKind::Actions);

			kinds
		},
		Mode::NoteCreation =>
			vec![AdapterKind::NotesByTitle, AdapterKind::NotesByContent, AdapterKind::CreateNote],
		Mode::TabGroup(_) => vec![AdapterKind::TabGroups],
		Mode::CustomView => vec![
			AdapterKind::NotesByTitle,
			AdapterKind::History,
			AdapterKind::Links,
			AdapterKind::Actions,
		],
	}
}

pub async fn run(kind: AdapterKind, req: &AdapterRequest) -> Batch {
	match fetch(kind, req).await {
		Ok(candidates) => Batch { adapter: kind, candidates },
		Err(err) => {
			tracing::error!(error = %err, adapter = kind.as_str(), "Adapter failed. Using an empty batch.");

			Batch::empty(kind)
		},
	}
}

/// Create-note is offered when the query names no existing note and is not an address.
pub fn can_offer_create_note(query: &str, title_exists: bool) -> bool {
	!title_exists && !url::has_scheme(query) && query.chars().any(|c| !c.is_whitespace())
}

async fn fetch(kind: AdapterKind, req: &AdapterRequest) -> color_eyre::Result<Vec<Candidate>> {
	let query = req.query.as_str();
	let ctx = &req.ctx;
	let collaborators = &req.collaborators;

	match kind {
		AdapterKind::NotesByTitle => {
			let Some(notes) = &collaborators.notes else { return Ok(Vec::new()) };
			let hits = notes.search_titles(query, req.omnibox.notes_cap, ctx).await?;

			Ok(hits.into_iter().map(|hit| note_candidate(hit, Some(query))).collect())
		},
		AdapterKind::NotesByContent => {
			let Some(notes) = &collaborators.notes else { return Ok(Vec::new()) };
			let hits = notes.search_contents(query, req.sources.note_contents_limit, ctx).await?;

			Ok(hits.into_iter().map(|hit| note_candidate(hit, Some(query))).collect())
		},
		AdapterKind::RecentNotes => {
			let Some(notes) = &collaborators.notes else { return Ok(Vec::new()) };
			let limit = req.omnibox.recent_notes_limit;
			let mut hits = notes.recent(limit, ctx).await?;

			hits.sort_by(|a, b| {
				b.frecency.unwrap_or(0.0).total_cmp(&a.frecency.unwrap_or(0.0))
			});
			hits.truncate(limit);

			Ok(hits.into_iter().map(|hit| note_candidate(hit, None)).collect())
		},
		AdapterKind::CreateNote => {
			let title_exists = match &collaborators.notes {
				Some(notes) => notes.title_exists(query).await?,
				None => false,
			};

			if !can_offer_create_note(query, title_exists) {
				return Ok(Vec::new());
			}

			Ok(vec![
				Candidate::builder(query, Source::CreateNote)
					.information(CREATE_NOTE_INFORMATION)
					.completing_text(query)
					.build(),
			])
		},
		AdapterKind::TopDomain => {
			let Some(store) = &collaborators.top_domains else { return Ok(Vec::new()) };
			let hit = store.top_domain(query).await?;

			Ok(hit.into_iter().map(|hit| domain_candidate(hit, Source::TopDomain, query)).collect())
		},
		AdapterKind::Mnemonic => {
			let Some(store) = &collaborators.mnemonics else { return Ok(Vec::new()) };
			let hit = store.mnemonic(query).await?;

			Ok(hit.into_iter().map(|hit| domain_candidate(hit, Source::Mnemonic, query)).collect())
		},
		AdapterKind::History => {
			let Some(history) = &collaborators.history else { return Ok(Vec::new()) };
			let hits = history.search(query, ctx).await?;

			Ok(hits.into_iter().map(|hit| link_candidate(hit, Source::History, query)).collect())
		},
		AdapterKind::HistoryAliases => {
			let Some(history) = &collaborators.history else { return Ok(Vec::new()) };
			let hits = history.search_aliases(query, ctx).await?;

			Ok(hits
				.into_iter()
				.filter(|hit| hit.alias_destination.is_some())
				.map(|hit| link_candidate(hit, Source::History, query))
				.collect())
		},
		AdapterKind::Links => {
			let Some(links) = &collaborators.links else { return Ok(Vec::new()) };
			let hits = links.search(query, ctx).await?;

			Ok(hits.into_iter().map(|hit| link_candidate(hit, Source::Url, query)).collect())
		},
		AdapterKind::Tabs => {
			let Some(tabs) = &collaborators.tabs else { return Ok(Vec::new()) };
			let hits = tabs.open_tabs(query).await?;

			Ok(hits
				.into_iter()
				.map(|hit| {
					let mut builder =
						Candidate::builder(url::url_without_scheme(&hit.url), Source::Tab {
							tab_id: Some(hit.tab_id),
						})
						.url(hit.url.as_str())
						.url_fields(UrlFields::TEXT)
						.completing_text(query)
						.base_score(hit.score);

					if let Some(title) = hit.title {
						builder = builder.information(title);
					}
					if let Some(shortcut) = hit.shortcut {
						builder = builder.shortcut(shortcut);
					}
					if let Some(action) = hit.action {
						builder = builder.action(action);
					}

					builder.build()
				})
				.collect())
		},
		AdapterKind::TabGroups => {
			let Some(groups) = &collaborators.tab_groups else { return Ok(Vec::new()) };
			let scope = match &ctx.mode {
				Mode::TabGroup(group) => Some(group),
				_ => None,
			};
			let hits = groups.search(query, scope).await?;

			Ok(hits
				.into_iter()
				.map(|hit| {
					let text = hit.title.clone().unwrap_or_else(|| hit.group.title.clone());
					let mut builder =
						Candidate::builder(text, Source::TabGroup { group: Some(hit.group) })
							.completing_text(query)
							.base_score(hit.score);

					if let Some(url) = hit.url {
						builder = builder
							.information(url.as_str())
							.url(url)
							.url_fields(UrlFields::INFO);
					}

					builder.build()
				})
				.collect())
		},
		AdapterKind::SearchEngine => {
			let Some(client) = &collaborators.search_engine else { return Ok(Vec::new()) };
			let suggestions = client.suggest(query).await?;

			Ok(suggestions
				.into_iter()
				.map(|suggestion| {
					let mut builder = Candidate::builder(suggestion.text, Source::SearchEngine)
						.completing_text(query)
						.base_score(suggestion.score);

					if let Some(url) = suggestion.url {
						builder = builder.url(url);
					}

					builder.build()
				})
				.collect())
		},
		AdapterKind::Actions => {
			let Some(provider) = &collaborators.actions else { return Ok(Vec::new()) };
			let hits = provider.actions(query, &ctx.mode).await?;

			Ok(hits
				.into_iter()
				.map(|hit| {
					let mut builder = Candidate::builder(hit.title, Source::Action)
						.completing_text(query)
						.action(hit.action);

					if let Some(shortcut) = hit.shortcut {
						builder = builder.shortcut(shortcut);
					}

					builder.build()
				})
				.collect())
		},
	}
}

fn note_candidate(hit: NoteHit, query: Option<&str>) -> Candidate {
	let mut builder = Candidate::builder(hit.title, Source::Note {
		note_id: Some(hit.note_id),
		element_id: hit.element_id,
	})
	.uuid(hit.note_id)
	.base_score(hit.frecency);

	if let Some(excerpt) = hit.excerpt {
		builder = builder.information(excerpt);
	}
	if let Some(query) = query {
		builder = builder.completing_text(query);
	}

	builder.build()
}

fn domain_candidate(hit: LinkHit, source: Source, query: &str) -> Candidate {
	let mut builder = Candidate::builder(url::url_without_scheme(&hit.url), source)
		.url(hit.url.as_str())
		.url_fields(UrlFields::TEXT)
		.completing_text(query)
		.uuid(hit.id)
		.base_score(hit.frecency);

	if let Some(title) = hit.title {
		builder = builder.information(title);
	}

	builder.build()
}

/// History and link hits. Search results pages are re-tagged so the merge can pull them out.
fn link_candidate(hit: LinkHit, source: Source, query: &str) -> Candidate {
	if hit.is_search_result {
		let text = hit.title.clone().unwrap_or_else(|| hit.url.clone());

		return Candidate::builder(text, Source::SearchEngine)
			.url(hit.url)
			.completing_text(query)
			.uuid(hit.id)
			.base_score(hit.frecency)
			.build();
	}

	let mut builder = Candidate::builder(url::url_without_scheme(&hit.url), source)
		.url(hit.url.as_str())
		.url_fields(UrlFields::TEXT)
		.completing_text(query)
		.uuid(hit.id)
		.base_score(hit.frecency);

	if let Some(title) = hit.title {
		builder = builder.information(title);
	}
	if let Some(destination) = hit.alias_destination {
		builder = builder.alias_destination(destination);
	}

	builder.build()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_general_query_uses_the_default_set() {
		let sources = Sources::default();

		assert_eq!(plan(&Mode::General, "", false, &sources), vec![
			AdapterKind::RecentNotes,
			AdapterKind::Actions
		]);
	}

	#[test]
	fn private_browsing_skips_the_search_engine() {
		let sources = Sources::default();

		assert!(plan(&Mode::General, "abc", false, &sources).contains(&AdapterKind::SearchEngine));
		assert!(!plan(&Mode::General, "abc", true, &sources).contains(&AdapterKind::SearchEngine));
		assert!(!plan(&Mode::General, "abc", false, &sources).contains(&AdapterKind::Mnemonic));
	}

	#[test]
	fn note_creation_only_queries_notes() {
		let kinds = plan(&Mode::NoteCreation, "abc", false, &Sources::default());

		assert!(kinds.iter().all(|kind| kind.source().is_note_bearing()));
	}

	#[test]
	fn create_note_rules() {
		assert!(can_offer_create_note("Plans", false));
		assert!(!can_offer_create_note("Plans", true));
		assert!(!can_offer_create_note("https://plans.com", false));
		assert!(!can_offer_create_note("   ", false));
	}
}
