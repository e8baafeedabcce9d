pub mod adapters;
pub mod aggregator;
pub mod controller;
pub mod error;
pub mod merge;
pub mod selection;

pub use adapters::{AdapterKind, Batch};
pub use aggregator::{Aggregator, AggregatorEvent};
pub use controller::{Applied, QueryController};
pub use error::{Error, Result};
pub use merge::{LateInsertion, MergeInput, MergeOutput};
pub use selection::{Selection, TextFieldState};

use std::{future::Future, pin::Pin, sync::Arc};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use omnibox_config::Frecency;
use omnibox_domain::{CommitAction, Mode, TabGroupRef};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Per-query context handed to every collaborator.
#[derive(Debug, Clone)]
pub struct QueryContext {
	pub mode: Mode,
	pub is_private: bool,
	pub frecency: Frecency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteHit {
	pub note_id: Uuid,
	pub title: String,
	/// Set when the hit is a block inside the note rather than its title.
	#[serde(default)]
	pub element_id: Option<Uuid>,
	#[serde(default)]
	pub excerpt: Option<String>,
	#[serde(default)]
	pub frecency: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkHit {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub url: String,
	#[serde(default)]
	pub title: Option<String>,
	/// Destination this URL redirects to, when it is an alias.
	#[serde(default)]
	pub alias_destination: Option<String>,
	#[serde(default)]
	pub frecency: Option<f64>,
	/// The URL is a search results page of a known search engine.
	#[serde(default)]
	pub is_search_result: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabHit {
	pub tab_id: Uuid,
	pub url: String,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub score: Option<f64>,
	#[serde(default)]
	pub shortcut: Option<String>,
	#[serde(skip)]
	pub action: Option<CommitAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabGroupHit {
	pub group: TabGroupRef,
	/// Member page title; absent when the hit is the group itself.
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
	pub text: String,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ActionHit {
	pub title: String,
	pub shortcut: Option<String>,
	pub action: CommitAction,
}

pub trait NoteStore
where
	Self: Send + Sync,
{
	fn search_titles<'a>(
		&'a self,
		query: &'a str,
		limit: usize,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>>;

	fn search_contents<'a>(
		&'a self,
		query: &'a str,
		limit: usize,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>>;

	fn recent<'a>(
		&'a self,
		limit: usize,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<NoteHit>>>;

	fn title_exists<'a>(&'a self, title: &'a str) -> BoxFuture<'a, color_eyre::Result<bool>>;
}

pub trait HistoryStore
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>>;

	/// Alias URLs matching `query`, each carrying its destination.
	fn search_aliases<'a>(
		&'a self,
		query: &'a str,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>>;
}

pub trait LinkStore
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>>;
}

pub trait TopDomainStore
where
	Self: Send + Sync,
{
	fn top_domain<'a>(&'a self, query: &'a str)
	-> BoxFuture<'a, color_eyre::Result<Option<LinkHit>>>;
}

pub trait MnemonicStore
where
	Self: Send + Sync,
{
	fn mnemonic<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<Option<LinkHit>>>;
}

pub trait TabStore
where
	Self: Send + Sync,
{
	fn open_tabs<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<Vec<TabHit>>>;
}

pub trait TabGroupStore
where
	Self: Send + Sync,
{
	/// Groups matching `query`, or the members of `group` when one is given.
	fn search<'a>(
		&'a self,
		query: &'a str,
		group: Option<&'a TabGroupRef>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<TabGroupHit>>>;
}

/// Remote suggestion client. Dropping the returned future cancels the request.
pub trait SearchEngineClient
where
	Self: Send + Sync,
{
	fn suggest<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<Vec<Suggestion>>>;
}

pub trait ActionProvider
where
	Self: Send + Sync,
{
	fn actions<'a>(
		&'a self,
		query: &'a str,
		mode: &'a Mode,
	) -> BoxFuture<'a, color_eyre::Result<Vec<ActionHit>>>;
}

/// Backing stores. A missing collaborator behaves like one that always returns nothing.
#[derive(Clone, Default)]
pub struct Collaborators {
	pub notes: Option<Arc<dyn NoteStore>>,
	pub history: Option<Arc<dyn HistoryStore>>,
	pub links: Option<Arc<dyn LinkStore>>,
	pub top_domains: Option<Arc<dyn TopDomainStore>>,
	pub mnemonics: Option<Arc<dyn MnemonicStore>>,
	pub tabs: Option<Arc<dyn TabStore>>,
	pub tab_groups: Option<Arc<dyn TabGroupStore>>,
	pub search_engine: Option<Arc<dyn SearchEngineClient>>,
	pub actions: Option<Arc<dyn ActionProvider>>,
}
