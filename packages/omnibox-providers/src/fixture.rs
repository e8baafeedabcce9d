//! JSON fixture describing a browsing profile: notes, history, open tabs, and the rest.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use uuid::Uuid;

use omnibox_domain::TabGroupRef;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
	#[serde(default)]
	pub notes: Vec<FixtureNote>,
	#[serde(default)]
	pub history: Vec<FixtureLink>,
	#[serde(default)]
	pub links: Vec<FixtureLink>,
	#[serde(default)]
	pub top_domains: Vec<FixtureLink>,
	/// Keyword to destination, matched on the whole query.
	#[serde(default)]
	pub mnemonics: BTreeMap<String, FixtureLink>,
	#[serde(default)]
	pub tabs: Vec<FixtureTab>,
	#[serde(default)]
	pub tab_groups: Vec<FixtureTabGroup>,
	#[serde(default)]
	pub search_engine: Option<FixtureSearchEngine>,
	#[serde(default)]
	pub actions: Vec<FixtureAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureNote {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub title: String,
	#[serde(default)]
	pub body: Option<String>,
	/// Frecency values keyed by parameter name.
	#[serde(default)]
	pub frecency: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureLink {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub url: String,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub alias_destination: Option<String>,
	#[serde(default)]
	pub is_search_result: bool,
	#[serde(default)]
	pub frecency: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTab {
	#[serde(default = "Uuid::new_v4")]
	pub id: Uuid,
	pub url: String,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub score: Option<f64>,
	#[serde(default)]
	pub shortcut: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTabGroup {
	#[serde(flatten)]
	pub group: TabGroupRef,
	#[serde(default)]
	pub members: Vec<FixtureTab>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSearchEngine {
	/// Simulated network latency.
	#[serde(default)]
	pub latency_ms: u64,
	#[serde(default)]
	pub suggestions: Vec<FixtureSuggestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSuggestion {
	pub text: String,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureAction {
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub shortcut: Option<String>,
}

pub fn load(path: &Path) -> Result<Fixture> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadFixture { path: path.to_path_buf(), source: err })?;

	serde_json::from_str(&raw)
		.map_err(|err| Error::ParseFixture { path: path.to_path_buf(), source: err })
}

pub fn from_str(raw: &str) -> Result<Fixture> {
	Ok(serde_json::from_str(raw)?)
}
