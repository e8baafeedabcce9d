//! In-memory stores over a loaded [`Fixture`].

use std::sync::Arc;

use uuid::Uuid;

use omnibox_domain::{CommitAction, TabGroupRef, autoselect::starts_with_ignore_case, url};
use omnibox_service::{
	BoxFuture, HistoryStore, LinkHit, LinkStore, MnemonicStore, NoteHit, NoteStore, QueryContext,
	TabGroupHit, TabGroupStore, TabHit, TabStore, TopDomainStore,
};

use crate::fixture::{Fixture, FixtureLink, FixtureNote, FixtureTab};

const EXCERPT_CHARS: usize = 80;

/// Commit payload of an open-tab row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchToTab {
	pub tab_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct MemoryProfile {
	fixture: Arc<Fixture>,
}
impl MemoryProfile {
	pub fn new(fixture: Fixture) -> Self {
		Self { fixture: Arc::new(fixture) }
	}

	pub fn fixture(&self) -> &Fixture {
		&self.fixture
	}

	fn note_hits<'a>(
		&'a self,
		ctx: &QueryContext,
		notes: impl Iterator<Item = (&'a FixtureNote, Option<String>)>,
		limit: usize,
	) -> Vec<NoteHit> {
		notes
			.take(limit)
			.map(|(note, excerpt)| NoteHit {
				note_id: note.id,
				title: note.title.clone(),
				element_id: None,
				excerpt,
				frecency: note.frecency.get(&ctx.frecency.note_param_key).copied(),
			})
			.collect()
	}
}

impl NoteStore for MemoryProfile {
	fn search_titles<'a>(
		&'a self,
		query: &'a str,
		limit: usize,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		let notes = self.fixture.notes.iter().filter(|note| contains(&note.title, query));
		let hits = self.note_hits(ctx, notes.map(|note| (note, None)), limit);

		Box::pin(async move { Ok(hits) })
	}

	fn search_contents<'a>(
		&'a self,
		query: &'a str,
		limit: usize,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		let notes = self.fixture.notes.iter().filter_map(|note| {
			let body = note.body.as_deref()?;

			if query.trim().is_empty() || contains(&note.title, query) {
				return None;
			}

			excerpt(body, query).map(|excerpt| (note, Some(excerpt)))
		});
		let hits = self.note_hits(ctx, notes, limit);

		Box::pin(async move { Ok(hits) })
	}

	fn recent<'a>(
		&'a self,
		limit: usize,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		let key = &ctx.frecency.note_param_key;
		let mut notes: Vec<&FixtureNote> = self.fixture.notes.iter().collect();

		notes.sort_by(|a, b| {
			let a = a.frecency.get(key).copied().unwrap_or(0.0);
			let b = b.frecency.get(key).copied().unwrap_or(0.0);

			b.total_cmp(&a)
		});

		let hits = self.note_hits(ctx, notes.into_iter().map(|note| (note, None)), limit);

		Box::pin(async move { Ok(hits) })
	}

	fn title_exists<'a>(&'a self, title: &'a str) -> BoxFuture<'a, color_eyre::Result<bool>> {
		let exists = self.fixture.notes.iter().any(|note| note.title == title);

		Box::pin(async move { Ok(exists) })
	}
}

impl HistoryStore for MemoryProfile {
	fn search<'a>(
		&'a self,
		query: &'a str,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		let hits = link_hits(&self.fixture.history, query, ctx, |link| {
			link.alias_destination.is_none()
		});

		Box::pin(async move { Ok(hits) })
	}

	fn search_aliases<'a>(
		&'a self,
		query: &'a str,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		let hits = link_hits(&self.fixture.history, query, ctx, |link| {
			link.alias_destination.is_some()
		});

		Box::pin(async move { Ok(hits) })
	}
}

impl LinkStore for MemoryProfile {
	fn search<'a>(
		&'a self,
		query: &'a str,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		let hits = link_hits(&self.fixture.links, query, ctx, |_| true);

		Box::pin(async move { Ok(hits) })
	}
}

impl TopDomainStore for MemoryProfile {
	fn top_domain<'a>(
		&'a self,
		query: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<LinkHit>>> {
		let hit = (!query.trim().is_empty())
			.then(|| {
				self.fixture.top_domains.iter().find(|link| {
					starts_with_ignore_case(url::comparable_to(&link.url, query), query)
				})
			})
			.flatten()
			.map(|link| link_hit(link, None));

		Box::pin(async move { Ok(hit) })
	}
}

impl MnemonicStore for MemoryProfile {
	fn mnemonic<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<Option<LinkHit>>> {
		let hit = self
			.fixture
			.mnemonics
			.iter()
			.find(|(keyword, _)| keyword.eq_ignore_ascii_case(query.trim()))
			.map(|(_, link)| link_hit(link, None));

		Box::pin(async move { Ok(hit) })
	}
}

impl TabStore for MemoryProfile {
	fn open_tabs<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<Vec<TabHit>>> {
		let hits = self
			.fixture
			.tabs
			.iter()
			.filter(|tab| tab_matches(tab, query))
			.map(tab_hit)
			.collect();

		Box::pin(async move { Ok(hits) })
	}
}

impl TabGroupStore for MemoryProfile {
	fn search<'a>(
		&'a self,
		query: &'a str,
		group: Option<&'a TabGroupRef>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<TabGroupHit>>> {
		let hits = match group {
			Some(scope) => self
				.fixture
				.tab_groups
				.iter()
				.filter(|entry| entry.group.id == scope.id)
				.flat_map(|entry| {
					entry.members.iter().filter(|tab| tab_matches(tab, query)).map(|tab| {
						TabGroupHit {
							group: entry.group.clone(),
							title: Some(tab.title.clone().unwrap_or_else(|| tab.url.clone())),
							url: Some(tab.url.clone()),
							score: tab.score,
						}
					})
				})
				.collect(),
			None => self
				.fixture
				.tab_groups
				.iter()
				.filter(|entry| !query.trim().is_empty() && contains(&entry.group.title, query))
				.map(|entry| TabGroupHit {
					group: entry.group.clone(),
					title: None,
					url: None,
					score: None,
				})
				.collect(),
		};

		Box::pin(async move { Ok(hits) })
	}
}

fn contains(haystack: &str, query: &str) -> bool {
	query.is_empty() || haystack.to_lowercase().contains(&query.to_lowercase())
}

/// First body line containing `query`, clipped for display.
fn excerpt(body: &str, query: &str) -> Option<String> {
	let line = body.lines().find(|line| contains(line, query))?.trim();

	if line.chars().count() <= EXCERPT_CHARS {
		return Some(line.to_string());
	}

	Some(format!("{}…", line.chars().take(EXCERPT_CHARS).collect::<String>()))
}

fn link_hits(
	links: &[FixtureLink],
	query: &str,
	ctx: &QueryContext,
	keep: impl Fn(&FixtureLink) -> bool,
) -> Vec<LinkHit> {
	if query.trim().is_empty() {
		return Vec::new();
	}

	links
		.iter()
		.filter(|link| keep(link))
		.filter(|link| {
			contains(url::url_without_scheme(&link.url), query)
				|| link.title.as_deref().is_some_and(|title| contains(title, query))
		})
		.map(|link| link_hit(link, Some(ctx)))
		.collect()
}

fn link_hit(link: &FixtureLink, ctx: Option<&QueryContext>) -> LinkHit {
	let frecency = match ctx {
		Some(ctx) => link.frecency.get(&ctx.frecency.url_param_key),
		None => link.frecency.values().next(),
	};

	LinkHit {
		id: link.id,
		url: link.url.clone(),
		title: link.title.clone(),
		alias_destination: link.alias_destination.clone(),
		frecency: frecency.copied(),
		is_search_result: link.is_search_result,
	}
}

fn tab_matches(tab: &FixtureTab, query: &str) -> bool {
	contains(url::url_without_scheme(&tab.url), query)
		|| tab.title.as_deref().is_some_and(|title| contains(title, query))
}

fn tab_hit(tab: &FixtureTab) -> TabHit {
	TabHit {
		tab_id: tab.id,
		url: tab.url.clone(),
		title: tab.title.clone(),
		score: tab.score,
		shortcut: tab.shortcut.clone(),
		action: Some(CommitAction::new(SwitchToTab { tab_id: tab.id })),
	}
}
