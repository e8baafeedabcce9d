//! Deterministic collaborators and builders for service tests.
//!
//! Latency is simulated with `tokio::time::sleep`, so tests running on a paused clock stay
//! exact and fast.

use std::{
	collections::VecDeque,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use color_eyre::eyre;
use uuid::Uuid;

use omnibox_config::Config;
use omnibox_domain::{CommitAction, Mode, TabGroupRef};
use omnibox_service::{
	ActionHit, ActionProvider, BoxFuture, HistoryStore, LinkHit, LinkStore, MnemonicStore,
	NoteHit, NoteStore, QueryContext, SearchEngineClient, Suggestion, TabGroupHit, TabGroupStore,
	TabHit, TabStore, TopDomainStore,
};

/// Config with the stock budgets: limit 8, two search slots, 300 ms search deadline.
pub fn test_config() -> Config {
	let mut cfg = Config::default();

	cfg.service.log_level = "debug".to_string();
	cfg.omnibox.default_limit = 8;
	cfg.omnibox.search_engine_slots = 2;
	cfg.omnibox.search_engine_timeout_ms = 300;

	cfg
}

pub fn note(title: &str) -> NoteHit {
	NoteHit {
		note_id: Uuid::new_v4(),
		title: title.to_string(),
		element_id: None,
		excerpt: None,
		frecency: None,
	}
}

pub fn note_with_frecency(title: &str, frecency: f64) -> NoteHit {
	NoteHit { frecency: Some(frecency), ..note(title) }
}

pub fn visit(url: &str, title: Option<&str>, frecency: f64) -> LinkHit {
	LinkHit {
		id: Uuid::new_v4(),
		url: url.to_string(),
		title: title.map(str::to_string),
		alias_destination: None,
		frecency: Some(frecency),
		is_search_result: false,
	}
}

/// A search results page remembered in history.
pub fn search_page(url: &str, title: &str, frecency: f64) -> LinkHit {
	LinkHit { is_search_result: true, ..visit(url, Some(title), frecency) }
}

pub fn suggestion(text: &str, score: f64) -> Suggestion {
	Suggestion { text: text.to_string(), url: None, score: Some(score) }
}

pub fn tab(url: &str, title: &str, score: f64) -> TabHit {
	TabHit {
		tab_id: Uuid::new_v4(),
		url: url.to_string(),
		title: Some(title.to_string()),
		score: Some(score),
		shortcut: None,
		action: None,
	}
}

pub fn action(title: &str) -> ActionHit {
	ActionHit {
		title: title.to_string(),
		shortcut: None,
		action: CommitAction::new(title.to_string()),
	}
}

/// One scripted answer: wait `delay`, then return `response`.
#[derive(Debug, Clone)]
pub struct Step<T> {
	pub delay: Duration,
	pub response: Result<T, String>,
}
impl<T> Step<T> {
	pub fn ok(response: T) -> Self {
		Self { delay: Duration::ZERO, response: Ok(response) }
	}

	pub fn after(delay: Duration, response: T) -> Self {
		Self { delay, response: Ok(response) }
	}

	pub fn fail(message: &str) -> Self {
		Self { delay: Duration::ZERO, response: Err(message.to_string()) }
	}
}

/// Answers calls in order from a queue of steps, then repeats a fallback.
#[derive(Debug)]
pub struct Script<T> {
	steps: Mutex<VecDeque<Step<T>>>,
	fallback: Step<T>,
	calls: AtomicUsize,
	queries: Mutex<Vec<String>>,
}
impl<T> Script<T>
where
	T: Clone + Send,
{
	pub fn new(steps: impl IntoIterator<Item = Step<T>>, fallback: Step<T>) -> Arc<Self> {
		Arc::new(Self {
			steps: Mutex::new(steps.into_iter().collect()),
			fallback,
			calls: AtomicUsize::new(0),
			queries: Mutex::new(Vec::new()),
		})
	}

	/// Same answer for every call.
	pub fn always(step: Step<T>) -> Arc<Self> {
		Self::new([], step)
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn queries(&self) -> Vec<String> {
		self.queries.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn next(&self, query: &str) -> Step<T> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.queries.lock().unwrap_or_else(|err| err.into_inner()).push(query.to_string());

		self.steps
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.pop_front()
			.unwrap_or_else(|| self.fallback.clone())
	}

	fn play<'a>(&'a self, query: &str) -> BoxFuture<'a, color_eyre::Result<T>>
	where
		T: 'a,
	{
		let step = self.next(query);

		Box::pin(async move {
			if !step.delay.is_zero() {
				tokio::time::sleep(step.delay).await;
			}

			step.response.map_err(|message| eyre::eyre!(message))
		})
	}
}

pub type ScriptedSearchEngine = Script<Vec<Suggestion>>;
pub type ScriptedLinks = Script<Vec<LinkHit>>;
pub type ScriptedNotes = Script<Vec<NoteHit>>;

impl SearchEngineClient for Script<Vec<Suggestion>> {
	fn suggest<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<Vec<Suggestion>>> {
		self.play(query)
	}
}

/// Serves as history (plain visits only) and as the link store.
impl HistoryStore for Script<Vec<LinkHit>> {
	fn search<'a>(
		&'a self,
		query: &'a str,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		self.play(query)
	}

	fn search_aliases<'a>(
		&'a self,
		_query: &'a str,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		Box::pin(async { Ok(Vec::new()) })
	}
}

impl LinkStore for Script<Vec<LinkHit>> {
	fn search<'a>(
		&'a self,
		query: &'a str,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		self.play(query)
	}
}

/// Title search follows the script. Recents and title lookups come from fixed lists; content
/// search never matches.
pub struct ScriptedNoteStore {
	pub titles: Arc<ScriptedNotes>,
	pub recent: Vec<NoteHit>,
	pub existing: Vec<String>,
}

impl NoteStore for ScriptedNoteStore {
	fn search_titles<'a>(
		&'a self,
		query: &'a str,
		_limit: usize,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		self.titles.play(query)
	}

	fn search_contents<'a>(
		&'a self,
		_query: &'a str,
		_limit: usize,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		Box::pin(async { Ok(Vec::new()) })
	}

	fn recent<'a>(
		&'a self,
		limit: usize,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		let recent = self.recent.iter().take(limit).cloned().collect();

		Box::pin(async move { Ok(recent) })
	}

	fn title_exists<'a>(&'a self, title: &'a str) -> BoxFuture<'a, color_eyre::Result<bool>> {
		let exists = self.existing.iter().any(|existing| existing == title);

		Box::pin(async move { Ok(exists) })
	}
}

/// Fixed list of actions, shown for every query.
pub struct StaticActions(pub Vec<String>);

impl ActionProvider for StaticActions {
	fn actions<'a>(
		&'a self,
		_query: &'a str,
		_mode: &'a Mode,
	) -> BoxFuture<'a, color_eyre::Result<Vec<ActionHit>>> {
		let hits = self.0.iter().map(|title| action(title)).collect();

		Box::pin(async move { Ok(hits) })
	}
}

pub struct StaticTabs(pub Vec<TabHit>);

impl TabStore for StaticTabs {
	fn open_tabs<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, color_eyre::Result<Vec<TabHit>>> {
		let hits = self.0.clone();

		Box::pin(async move { Ok(hits) })
	}
}

/// Every call fails.
pub struct Failing;

impl Failing {
	fn fail<'a, T>(what: &'static str) -> BoxFuture<'a, color_eyre::Result<T>>
	where
		T: 'a,
	{
		Box::pin(async move { Err(eyre::eyre!("{what} is unavailable.")) })
	}
}

impl NoteStore for Failing {
	fn search_titles<'a>(
		&'a self,
		_query: &'a str,
		_limit: usize,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		Self::fail("Note store")
	}

	fn search_contents<'a>(
		&'a self,
		_query: &'a str,
		_limit: usize,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		Self::fail("Note store")
	}

	fn recent<'a>(
		&'a self,
		_limit: usize,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>> {
		Self::fail("Note store")
	}

	fn title_exists<'a>(&'a self, _title: &'a str) -> BoxFuture<'a, color_eyre::Result<bool>> {
		Self::fail("Note store")
	}
}

impl HistoryStore for Failing {
	fn search<'a>(
		&'a self,
		_query: &'a str,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		Self::fail("History")
	}

	fn search_aliases<'a>(
		&'a self,
		_query: &'a str,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		Self::fail("History")
	}
}

impl TopDomainStore for Failing {
	fn top_domain<'a>(
		&'a self,
		_query: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<LinkHit>>> {
		Self::fail("Top domains")
	}
}

impl MnemonicStore for Failing {
	fn mnemonic<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, color_eyre::Result<Option<LinkHit>>> {
		Self::fail("Mnemonics")
	}
}

impl TabGroupStore for Failing {
	fn search<'a>(
		&'a self,
		_query: &'a str,
		_group: Option<&'a TabGroupRef>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<TabGroupHit>>> {
		Self::fail("Tab groups")
	}
}

impl SearchEngineClient for Failing {
	fn suggest<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, color_eyre::Result<Vec<Suggestion>>> {
		Self::fail("Search engine")
	}
}
