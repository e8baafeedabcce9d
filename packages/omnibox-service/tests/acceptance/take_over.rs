use std::sync::Arc;

use omnibox_domain::{Candidate, Source};
use omnibox_service::Collaborators;
use omnibox_testkit::{ScriptedNoteStore, ScriptedNotes, Step};

fn calendly(query: &str) -> Candidate {
	Candidate::builder("Calendly", Source::note()).completing_text(query).build()
}

#[test]
fn partial_title_prefix_is_not_a_take_over() {
	assert!(!calendly("cal").is_take_over());
	assert!(calendly("calendly").is_take_over());
	assert!(calendly("Calendly").is_take_over());
}

#[tokio::test(start_paused = true)]
async fn only_the_full_title_is_auto_selected() {
	let notes = ScriptedNoteStore {
		titles: ScriptedNotes::always(Step::ok(vec![omnibox_testkit::note("Calendly")])),
		recent: Vec::new(),
		existing: vec!["Calendly".to_string()],
	};
	let mut controller =
		super::controller(Collaborators { notes: Some(Arc::new(notes)), ..Default::default() });

	controller.set_query("cal");
	super::settle(&mut controller).await;

	assert_eq!(super::texts(&controller)[0], "Calendly");
	assert_eq!(controller.selected_index(), None);

	controller.set_query("Calendly");
	super::settle(&mut controller).await;

	assert_eq!(super::texts(&controller), ["Calendly"]);
	assert_eq!(controller.selected_index(), Some(0));
	// Notes are never completed inline; the field keeps what was typed.
	assert_eq!(controller.text_field().text, "Calendly");
	assert_eq!(controller.text_field().selected_range, None);
}
