use omnibox_domain::SourceKind;
use omnibox_service::{Collaborators, TextFieldState};
use omnibox_testkit::{ScriptedLinks, Step};

#[tokio::test(start_paused = true)]
async fn history_match_leads_and_completes_inline() {
	let history = super::history(vec![omnibox_testkit::visit("https://abcsite.com", None, 10.0)]);
	let mut controller = super::controller(Collaborators {
		history: Some(history),
		links: Some(ScriptedLinks::always(Step::ok(Vec::new()))),
		..Default::default()
	});

	controller.set_query("abc");
	super::settle(&mut controller).await;

	let first = controller.results().first().expect("At least one row.");

	assert!(first.source().priority() <= 1);
	assert_eq!(first.kind(), SourceKind::History);
	assert_eq!(controller.selected_index(), Some(0));
	assert_eq!(controller.text_field(), &TextFieldState {
		text: "abcsite.com".to_string(),
		selected_range: Some(3..11),
	});
	// Nothing is titled "abc", so creating that note is offered after the ranked rows.
	assert!(controller.can_create_note());
	assert_eq!(controller.results().last().map(|c| c.kind()), Some(SourceKind::CreateNote));
}
