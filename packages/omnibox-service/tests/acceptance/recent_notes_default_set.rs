use std::sync::Arc;

use omnibox_domain::SourceKind;
use omnibox_service::{Applied, Collaborators};
use omnibox_testkit::{ScriptedNoteStore, ScriptedNotes, StaticActions, Step};

#[tokio::test(start_paused = true)]
async fn empty_query_shows_recent_notes_then_actions() {
	let history = super::history(Vec::new());
	let notes = ScriptedNoteStore {
		titles: ScriptedNotes::always(Step::ok(Vec::new())),
		recent: vec![
			omnibox_testkit::note_with_frecency("Groceries", 1.0),
			omnibox_testkit::note_with_frecency("Weekly review", 9.0),
			omnibox_testkit::note_with_frecency("Reading list", 4.0),
			omnibox_testkit::note_with_frecency("Trip plan", 7.0),
		],
		existing: Vec::new(),
	};
	let mut controller = super::controller(Collaborators {
		notes: Some(Arc::new(notes)),
		history: Some(history.clone()),
		actions: Some(Arc::new(StaticActions(vec![
			"Open settings".to_string(),
			"New window".to_string(),
		]))),
		..Default::default()
	});

	controller.set_query("");

	assert_eq!(super::settle(&mut controller).await, Applied::Merged { results: 5 });

	let kinds: Vec<_> = controller.results().iter().map(|c| c.kind()).collect();

	assert_eq!(kinds, [
		SourceKind::Note,
		SourceKind::Note,
		SourceKind::Note,
		SourceKind::Action,
		SourceKind::Action,
	]);
	// The store hands back the first three; they are shown by frecency.
	assert_eq!(&super::texts(&controller)[..3], ["Weekly review", "Reading list", "Groceries"]);
	assert_eq!(history.calls(), 0);
	assert_eq!(controller.selected_index(), None);
	assert!(controller.loading_candidate().is_none());
}
