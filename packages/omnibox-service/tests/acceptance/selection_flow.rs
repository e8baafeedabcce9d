use omnibox_domain::SourceKind;
use omnibox_service::{Collaborators, QueryController, TextFieldState};
use omnibox_testkit::{ScriptedSearchEngine, Step};

/// History knows abcsite.com and the search engine answers right away.
fn controller() -> QueryController {
	super::controller(Collaborators {
		history: Some(super::history(vec![omnibox_testkit::visit(
			"https://abcsite.com",
			None,
			10.0,
		)])),
		search_engine: Some(ScriptedSearchEngine::always(Step::ok(vec![
			omnibox_testkit::suggestion("abc search", 5.0),
		]))),
		..Default::default()
	})
}

fn completion(text: &str, range: std::ops::Range<usize>) -> TextFieldState {
	TextFieldState { text: text.to_string(), selected_range: Some(range) }
}

#[tokio::test(start_paused = true)]
async fn arrows_wrap_and_drive_the_text_field() {
	let mut controller = controller();

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(super::texts(&controller), ["abcsite.com", "abc search", "abc"]);
	assert_eq!(controller.text_field(), &completion("abcsite.com", 3..11));

	controller.select_next();

	assert_eq!(controller.selected_index(), Some(1));
	assert_eq!(controller.text_field(), &TextFieldState::plain("abc search"));

	controller.select_next();
	controller.select_next();

	assert_eq!(controller.selected_index(), Some(0));
	assert_eq!(controller.text_field(), &completion("abcsite.com", 3..11));

	controller.select_previous();

	assert_eq!(controller.selected_index(), Some(2));
	assert_eq!(controller.selected_candidate().map(|c| c.kind()), Some(SourceKind::CreateNote));
}

#[tokio::test(start_paused = true)]
async fn echoed_text_does_not_start_a_query() {
	let mut controller = controller();

	controller.set_query("abc");
	super::settle(&mut controller).await;
	controller.select_next();

	let generation = controller.generation();

	controller.set_query("abc search");

	assert_eq!(controller.generation(), generation);
	assert_eq!(controller.query(), "abc");
	assert_eq!(controller.selected_index(), Some(1));

	super::assert_quiet(&mut controller).await;
}

#[tokio::test(start_paused = true)]
async fn deleting_never_auto_selects() {
	let mut controller = controller();

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(controller.selected_index(), Some(0));

	// Backspace removes the selected completion and leaves the typed text.
	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(controller.selected_index(), None);
	assert_eq!(controller.text_field(), &TextFieldState::plain("abc"));

	controller.set_query("abcs");
	super::settle(&mut controller).await;

	assert_eq!(controller.selected_index(), Some(0));
	assert_eq!(controller.text_field(), &completion("abcsite.com", 4..11));
}

#[tokio::test(start_paused = true)]
async fn typing_through_the_completion_keeps_it() {
	let history = super::history(vec![omnibox_testkit::visit("https://abcsite.com", None, 10.0)]);
	let mut controller =
		super::controller(Collaborators { history: Some(history.clone()), ..Default::default() });

	controller.set_query("abc");
	super::settle(&mut controller).await;

	let proposed = controller.propose_text("abcs").expect("Typed letter follows the completion.");

	assert_eq!(proposed, completion("abcsite.com", 4..11));

	// The host writes the proposed state back, which reads as a change of the whole field.
	controller.set_query("abcsite.com");

	assert_eq!(controller.query(), "abcs");

	super::settle(&mut controller).await;

	assert_eq!(history.queries(), ["abc", "abcs"]);
	assert_eq!(controller.selected_index(), Some(0));
	assert_eq!(controller.text_field(), &completion("abcsite.com", 4..11));
}

#[tokio::test(start_paused = true)]
async fn losing_the_completion_keeps_the_typed_letter() {
	let history = omnibox_testkit::ScriptedLinks::new(
		[Step::ok(vec![omnibox_testkit::visit("https://abcsite.com", None, 10.0)])],
		Step::ok(Vec::new()),
	);
	let mut controller =
		super::controller(Collaborators { history: Some(history), ..Default::default() });

	controller.set_query("abc");
	super::settle(&mut controller).await;
	controller.propose_text("abcs").expect("Typed letter follows the completion.");
	controller.set_query("abcsite.com");
	super::settle(&mut controller).await;

	assert_eq!(controller.query(), "abcs");
	assert_eq!(controller.selected_index(), None);
	assert_eq!(controller.text_field(), &TextFieldState::plain("abcs"));

	// The host echoes the restored text back.
	let generation = controller.generation();

	controller.set_query("abcs");

	assert_eq!(controller.generation(), generation);
	assert_eq!(controller.text_field().text, controller.query());
}

#[tokio::test(start_paused = true)]
async fn a_mismatched_letter_is_not_typed_through() {
	let mut controller = controller();

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert!(controller.propose_text("abcx").is_none());
}

#[tokio::test(start_paused = true)]
async fn selected_search_row_survives_a_matching_edit() {
	let mut controller = controller();

	controller.set_query("abc");
	super::settle(&mut controller).await;
	controller.select_next();

	assert_eq!(controller.selected_candidate().map(|c| c.text()), Some("abc search"));

	controller.set_query("abc s");
	super::settle(&mut controller).await;

	let selected = controller.selected_candidate().expect("Search row stays selected.");

	assert_eq!(selected.kind(), SourceKind::SearchEngine);
	assert_eq!(selected.text(), "abc search");
}

#[tokio::test(start_paused = true)]
async fn right_arrow_commits_the_completion() {
	let mut controller = controller();

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert!(controller.accept_completion());
	assert_eq!(controller.query(), "abcsite.com");
	assert_eq!(controller.text_field(), &TextFieldState::plain("abcsite.com"));
	assert_eq!(controller.selected_index(), None);
	assert!(!controller.accept_completion());
}

#[tokio::test(start_paused = true)]
async fn left_arrow_keeps_only_the_typed_text() {
	let mut controller = controller();

	controller.set_query("abc");
	super::settle(&mut controller).await;
	controller.truncate_to_typed();

	assert_eq!(controller.query(), "abc");
	assert_eq!(controller.text_field(), &TextFieldState::plain("abc"));
	assert_eq!(controller.selected_index(), None);
}
