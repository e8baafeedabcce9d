use std::time::Duration;

use omnibox_domain::SourceKind;
use omnibox_service::{Applied, Collaborators};
use omnibox_testkit::{ScriptedSearchEngine, Step};

#[tokio::test(start_paused = true)]
async fn empty_answer_within_the_deadline_is_final() {
	let search_engine =
		ScriptedSearchEngine::always(Step::after(Duration::from_millis(100), Vec::new()));
	let mut controller = super::controller(Collaborators {
		history: Some(super::history(vec![omnibox_testkit::visit(
			"https://abcsite.com",
			None,
			10.0,
		)])),
		search_engine: Some(search_engine.clone()),
		..Default::default()
	});

	controller.set_query("abc");

	assert!(matches!(super::settle(&mut controller).await, Applied::Merged { .. }));
	assert!(controller.loading_candidate().is_none());
	assert!(controller.results().iter().all(|c| c.kind() != SourceKind::SearchEngine));
	assert_eq!(search_engine.calls(), 1);

	super::assert_quiet(&mut controller).await;
}

#[tokio::test(start_paused = true)]
async fn answer_within_the_deadline_is_merged_in_place() {
	let search_engine = ScriptedSearchEngine::always(Step::after(Duration::from_millis(100), vec![
		omnibox_testkit::suggestion("abc search", 5.0),
	]));
	let mut controller = super::controller(Collaborators {
		history: Some(super::history(vec![omnibox_testkit::visit(
			"https://abcsite.com",
			None,
			10.0,
		)])),
		search_engine: Some(search_engine),
		..Default::default()
	});

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(super::texts(&controller), ["abcsite.com", "abc search", "abc"]);
	assert!(controller.loading_candidate().is_none());

	super::assert_quiet(&mut controller).await;
}

#[tokio::test(start_paused = true)]
async fn failed_search_engine_degrades_to_no_rows() {
	let mut controller = super::controller(Collaborators {
		search_engine: Some(ScriptedSearchEngine::always(Step::fail("Suggest endpoint is down."))),
		..Default::default()
	});

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(super::texts(&controller), ["abc"]);
	assert!(controller.loading_candidate().is_none());
}

#[tokio::test(start_paused = true)]
async fn private_browsing_never_asks_the_search_engine() {
	let search_engine = ScriptedSearchEngine::always(Step::ok(vec![omnibox_testkit::suggestion(
		"abc search",
		5.0,
	)]));
	let mut controller = super::controller(Collaborators {
		search_engine: Some(search_engine.clone()),
		..Default::default()
	});

	controller.set_private(true);
	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(search_engine.calls(), 0);
	assert!(controller.results().iter().all(|c| c.kind() != SourceKind::SearchEngine));
}
