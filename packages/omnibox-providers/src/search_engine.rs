//! Suggestion client that answers from fixture data after a simulated delay.

use std::time::Duration;

use omnibox_domain::autoselect::starts_with_ignore_case;
use omnibox_service::{BoxFuture, SearchEngineClient, Suggestion};

use crate::fixture::FixtureSearchEngine;

#[derive(Debug, Clone)]
pub struct FixtureSuggestions {
	latency: Duration,
	suggestions: Vec<Suggestion>,
}
impl FixtureSuggestions {
	pub fn new(cfg: &FixtureSearchEngine) -> Self {
		Self {
			latency: Duration::from_millis(cfg.latency_ms),
			suggestions: cfg
				.suggestions
				.iter()
				.map(|entry| Suggestion {
					text: entry.text.clone(),
					url: entry.url.clone(),
					score: entry.score,
				})
				.collect(),
		}
	}

	pub fn latency(&self) -> Duration {
		self.latency
	}
}

impl SearchEngineClient for FixtureSuggestions {
	fn suggest<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<Vec<Suggestion>>> {
		Box::pin(async move {
			if !self.latency.is_zero() {
				tokio::time::sleep(self.latency).await;
			}

			let suggestions: Vec<Suggestion> = self
				.suggestions
				.iter()
				.filter(|suggestion| starts_with_ignore_case(&suggestion.text, query))
				.cloned()
				.collect();

			tracing::debug!(count = suggestions.len(), "Fixture suggestions served.");

			Ok(suggestions)
		})
	}
}
