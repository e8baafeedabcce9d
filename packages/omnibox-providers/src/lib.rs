//! Fixture-backed collaborators for the omnibox service.

pub mod actions;
pub mod fixture;
pub mod memory;
pub mod search_engine;

mod error;

pub use actions::{FixtureActions, RunCommand};
pub use error::{Error, Result};
pub use fixture::Fixture;
pub use memory::{MemoryProfile, SwitchToTab};
pub use search_engine::FixtureSuggestions;

use std::sync::Arc;

use omnibox_service::Collaborators;

/// Wires every collaborator to one fixture. The search engine is only present when the
/// fixture describes one.
pub fn collaborators(fixture: Fixture) -> Collaborators {
	let search_engine = fixture.search_engine.as_ref().map(FixtureSuggestions::new);
	let actions = FixtureActions::new(fixture.actions.clone());
	let profile = Arc::new(MemoryProfile::new(fixture));

	Collaborators {
		notes: Some(profile.clone()),
		history: Some(profile.clone()),
		links: Some(profile.clone()),
		top_domains: Some(profile.clone()),
		mnemonics: Some(profile.clone()),
		tabs: Some(profile.clone()),
		tab_groups: Some(profile),
		search_engine: search_engine
			.map(|client| Arc::new(client) as Arc<dyn omnibox_service::SearchEngineClient>),
		actions: Some(Arc::new(actions)),
	}
}
