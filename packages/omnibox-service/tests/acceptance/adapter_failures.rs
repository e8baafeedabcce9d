use std::sync::Arc;

use omnibox_domain::SourceKind;
use omnibox_service::{Applied, Collaborators};
use omnibox_testkit::{Failing, ScriptedLinks, Step};

#[tokio::test(start_paused = true)]
async fn failing_sources_become_empty_batches() {
	let mut controller = super::controller(Collaborators {
		notes: Some(Arc::new(Failing)),
		history: Some(Arc::new(Failing)),
		links: Some(ScriptedLinks::always(Step::ok(vec![omnibox_testkit::visit(
			"https://abcsite.com",
			Some("ABC Site"),
			3.0,
		)]))),
		top_domains: Some(Arc::new(Failing)),
		mnemonics: Some(Arc::new(Failing)),
		tab_groups: Some(Arc::new(Failing)),
		search_engine: Some(Arc::new(Failing)),
		..Default::default()
	});

	controller.set_query("abc");

	assert_eq!(super::settle(&mut controller).await, Applied::Merged { results: 1 });
	assert_eq!(controller.results()[0].kind(), SourceKind::Url);
	// The create-note lookup failed too, so no create-note row.
	assert!(!controller.can_create_note());
}

#[tokio::test(start_paused = true)]
async fn missing_collaborators_behave_like_empty_ones() {
	let mut controller = super::controller(Collaborators::default());

	controller.set_query("");

	assert_eq!(super::settle(&mut controller).await, Applied::Merged { results: 0 });
	assert_eq!(controller.selected_index(), None);
}

#[test]
fn invalid_config_is_rejected() {
	let mut cfg = omnibox_testkit::test_config();

	cfg.omnibox.default_limit = 0;

	let err = omnibox_service::QueryController::new(cfg, Collaborators::default())
		.err()
		.expect("Zero limit must be rejected.");

	assert!(matches!(err, omnibox_service::Error::InvalidRequest { .. }));
}
