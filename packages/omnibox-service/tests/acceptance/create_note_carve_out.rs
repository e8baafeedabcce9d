use std::sync::Arc;

use omnibox_domain::{Mode, SourceKind};
use omnibox_service::Collaborators;
use omnibox_testkit::{ScriptedLinks, ScriptedNoteStore, ScriptedNotes, Step};

fn visits(prefix: &str, count: usize) -> Vec<omnibox_service::LinkHit> {
	(0..count)
		.map(|i| omnibox_testkit::visit(&format!("https://{prefix}{i}.com"), None, 10.0))
		.collect()
}

#[tokio::test(start_paused = true)]
async fn create_note_row_is_shown_beyond_the_limit() {
	let mut controller = super::controller(Collaborators {
		history: Some(super::history(visits("abc-history-", 4))),
		links: Some(ScriptedLinks::always(Step::ok(visits("abc-link-", 4)))),
		..Default::default()
	});

	controller.set_query("abc");
	super::settle(&mut controller).await;

	let results = controller.results();

	assert_eq!(controller.limit(), 8);
	assert_eq!(results.len(), 9);
	assert!(results[..8].iter().all(|c| c.kind() != SourceKind::CreateNote));
	assert_eq!(results[8].kind(), SourceKind::CreateNote);
	assert_eq!(results[8].text(), "abc");
	assert_eq!(results[8].information(), Some("New note"));
}

#[tokio::test(start_paused = true)]
async fn note_creation_mode_puts_create_note_first_and_selects_it() {
	let titles: Vec<_> = (0..6).map(|i| omnibox_testkit::note(&format!("abc {i}"))).collect();
	let notes = ScriptedNoteStore {
		titles: ScriptedNotes::always(Step::ok(titles)),
		recent: Vec::new(),
		existing: Vec::new(),
	};
	let mut controller =
		super::controller(Collaborators { notes: Some(Arc::new(notes)), ..Default::default() });

	controller.set_query("abc");
	super::settle(&mut controller).await;
	controller.set_mode(Mode::NoteCreation);
	super::settle(&mut controller).await;

	let results = controller.results();

	assert_eq!(results.len(), 7);
	assert_eq!(results[0].kind(), SourceKind::CreateNote);
	assert!(results[1..].iter().all(|c| c.kind() == SourceKind::Note));
	assert_eq!(controller.selected_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn existing_titles_and_addresses_are_not_offered() {
	let notes = ScriptedNoteStore {
		titles: ScriptedNotes::always(Step::ok(Vec::new())),
		recent: Vec::new(),
		existing: vec!["Groceries".to_string()],
	};
	let mut controller =
		super::controller(Collaborators { notes: Some(Arc::new(notes)), ..Default::default() });

	controller.set_query("Groceries");
	super::settle(&mut controller).await;

	assert!(!controller.can_create_note());

	controller.set_query("https://example.com");
	super::settle(&mut controller).await;

	assert!(!controller.can_create_note());

	controller.set_query("groceries");
	super::settle(&mut controller).await;

	assert!(controller.can_create_note());
}
