use std::{sync::Arc, time::Duration};

use omnibox_service::{
	AggregatorEvent, Applied, BoxFuture, Collaborators, HistoryStore, LinkHit, QueryContext,
};
use omnibox_testkit::{ScriptedLinks, Step};

/// Answers every query with one visit named after it, after a fixed delay.
struct EchoHistory;

impl HistoryStore for EchoHistory {
	fn search<'a>(
		&'a self,
		query: &'a str,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		Box::pin(async move {
			tokio::time::sleep(Duration::from_millis(50)).await;

			Ok(vec![omnibox_testkit::visit(&format!("https://{query}.com"), None, 10.0)])
		})
	}

	fn search_aliases<'a>(
		&'a self,
		_query: &'a str,
		_ctx: &'a QueryContext,
	) -> BoxFuture<'a, color_eyre::Result<Vec<LinkHit>>> {
		Box::pin(async { Ok(Vec::new()) })
	}
}

#[tokio::test(start_paused = true)]
async fn superseded_query_never_reaches_the_list() {
	let mut controller = super::controller(Collaborators {
		history: Some(Arc::new(EchoHistory)),
		..Default::default()
	});

	controller.set_query("abc");
	controller.set_query("abcd");

	assert_eq!(controller.generation(), 2);
	assert_eq!(super::settle(&mut controller).await, Applied::Merged { results: 2 });
	assert_eq!(super::texts(&controller), ["abcd.com", "abcd"]);

	super::assert_quiet(&mut controller).await;
}

#[tokio::test(start_paused = true)]
async fn events_from_an_older_generation_are_dropped() {
	let mut controller = super::controller(Collaborators {
		history: Some(super::history(vec![omnibox_testkit::visit(
			"https://abcsite.com",
			None,
			10.0,
		)])),
		..Default::default()
	});

	controller.set_query("abc");
	super::settle(&mut controller).await;

	let before = super::texts(&controller);
	let stale = AggregatorEvent::Completed {
		generation: controller.generation() - 1,
		batches: Vec::new(),
		search_engine_pending: false,
	};

	assert_eq!(controller.apply(stale), Applied::Stale);
	assert_eq!(super::texts(&controller), before);
}

#[tokio::test(start_paused = true)]
async fn late_answer_without_a_pending_search_is_ignored() {
	let mut controller = super::controller(Collaborators::default());

	controller.set_query("abc");
	super::settle(&mut controller).await;

	let before = super::texts(&controller);
	let late = AggregatorEvent::LateSearchEngine {
		generation: controller.generation(),
		batch: omnibox_service::Batch::empty(omnibox_service::AdapterKind::SearchEngine),
	};

	assert_eq!(controller.apply(late), Applied::Stale);
	assert_eq!(super::texts(&controller), before);
}

#[tokio::test(start_paused = true)]
async fn clearing_cancels_in_flight_work() {
	let history = ScriptedLinks::always(Step::after(Duration::from_millis(200), vec![
		omnibox_testkit::visit("https://abcsite.com", None, 10.0),
	]));
	let mut controller =
		super::controller(Collaborators { history: Some(history), ..Default::default() });

	controller.set_query("abc");
	controller.clear_results();

	assert!(controller.results().is_empty());

	super::assert_quiet(&mut controller).await;
	assert_eq!(controller.query(), "abc");
}
