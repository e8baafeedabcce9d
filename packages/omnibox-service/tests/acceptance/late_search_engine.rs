use std::time::Duration;

use tokio::time::Instant;

use omnibox_domain::SourceKind;
use omnibox_service::{Applied, Collaborators};
use omnibox_testkit::{ScriptedSearchEngine, Step};

fn slow_search_engine() -> std::sync::Arc<ScriptedSearchEngine> {
	ScriptedSearchEngine::always(Step::after(Duration::from_millis(450), vec![
		omnibox_testkit::suggestion("abc search", 5.0),
	]))
}

#[tokio::test(start_paused = true)]
async fn late_answer_lands_after_the_last_stronger_row() {
	let started = Instant::now();
	let mut controller = super::controller(Collaborators {
		history: Some(super::history(vec![omnibox_testkit::visit(
			"https://abcsite.com",
			None,
			10.0,
		)])),
		search_engine: Some(slow_search_engine()),
		..Default::default()
	});

	controller.set_query("abc");

	assert!(matches!(super::settle(&mut controller).await, Applied::Merged { .. }));
	assert!(started.elapsed() >= Duration::from_millis(300));
	assert!(started.elapsed() < Duration::from_millis(450));
	assert!(controller.results().iter().all(|c| c.kind() != SourceKind::SearchEngine));

	let loading = controller.loading_candidate().expect("A search answer is still expected.");

	assert_eq!(loading.kind(), SourceKind::SearchEngine);
	assert_eq!(loading.text(), "abc");

	let applied = super::settle(&mut controller).await;

	assert!(started.elapsed() >= Duration::from_millis(450));
	assert_eq!(applied, Applied::LateInserted { index: 1, inserted: 1 });
	assert_eq!(super::texts(&controller)[..2], ["abcsite.com", "abc search"]);
	assert_eq!(controller.selected_index(), Some(0));
	assert!(controller.loading_candidate().is_none());

	super::assert_quiet(&mut controller).await;
}

#[tokio::test(start_paused = true)]
async fn late_answer_goes_first_when_nothing_outranks_it() {
	let mut controller = super::controller(Collaborators {
		search_engine: Some(slow_search_engine()),
		..Default::default()
	});

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(super::texts(&controller), ["abc"]);
	assert_eq!(controller.selected_index(), None);

	assert_eq!(super::settle(&mut controller).await, Applied::LateInserted {
		index: 0,
		inserted: 1,
	});
	assert_eq!(super::texts(&controller), ["abc search", "abc"]);
}

#[tokio::test(start_paused = true)]
async fn late_answer_for_a_replaced_query_is_never_shown() {
	let delay = Duration::from_millis(450);
	let search_engine = ScriptedSearchEngine::new(
		[
			Step::after(delay, vec![omnibox_testkit::suggestion("abc search", 5.0)]),
			Step::after(delay, vec![omnibox_testkit::suggestion("xyz search", 5.0)]),
		],
		Step::ok(Vec::new()),
	);
	let mut controller = super::controller(Collaborators {
		search_engine: Some(search_engine.clone()),
		..Default::default()
	});

	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert!(controller.loading_candidate().is_some());

	controller.set_query("xyz");

	assert!(controller.loading_candidate().is_none());

	super::settle(&mut controller).await;
	// The new generation waits on its own answer.
	assert_eq!(controller.loading_candidate().map(|c| c.text()), Some("xyz"));
	assert_eq!(super::settle(&mut controller).await, Applied::LateInserted {
		index: 0,
		inserted: 1,
	});
	assert_eq!(super::texts(&controller), ["xyz search", "xyz"]);
	assert_eq!(search_engine.queries(), ["abc", "xyz"]);

	super::assert_quiet(&mut controller).await;
}
