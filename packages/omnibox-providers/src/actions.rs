use omnibox_domain::{CommitAction, Mode};
use omnibox_service::{ActionHit, ActionProvider, BoxFuture};

use crate::fixture::FixtureAction;

/// Commit payload of a quick action; the UI looks the command up by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
	pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureActions {
	actions: Vec<FixtureAction>,
}
impl FixtureActions {
	pub fn new(actions: Vec<FixtureAction>) -> Self {
		Self { actions }
	}
}

impl ActionProvider for FixtureActions {
	fn actions<'a>(
		&'a self,
		query: &'a str,
		mode: &'a Mode,
	) -> BoxFuture<'a, color_eyre::Result<Vec<ActionHit>>> {
		let query = query.trim().to_lowercase();
		let hits = self
			.actions
			.iter()
			.filter(|_| !matches!(mode, Mode::TabGroup(_)))
			.filter(|action| query.is_empty() || action.title.to_lowercase().contains(&query))
			.map(|action| ActionHit {
				title: action.title.clone(),
				shortcut: action.shortcut.clone(),
				action: CommitAction::new(RunCommand { id: action.id.clone() }),
			})
			.collect();

		Box::pin(async move { Ok(hits) })
	}
}
