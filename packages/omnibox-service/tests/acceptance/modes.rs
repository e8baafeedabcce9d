use std::sync::Arc;

use uuid::Uuid;

use omnibox_domain::{Mode, SourceKind, TabGroupRef};
use omnibox_service::{BoxFuture, Collaborators, TabGroupHit, TabGroupStore};
use omnibox_testkit::{ScriptedSearchEngine, Step};

/// One group holding the given number of members. Unscoped searches find nothing.
struct GroupMembers(usize);

impl TabGroupStore for GroupMembers {
	fn search<'a>(
		&'a self,
		_query: &'a str,
		group: Option<&'a TabGroupRef>,
	) -> BoxFuture<'a, color_eyre::Result<Vec<TabGroupHit>>> {
		let hits = group
			.map(|group| {
				(0..self.0)
					.map(|i| TabGroupHit {
						group: group.clone(),
						title: Some(format!("Member {i}")),
						url: Some(format!("https://member{i}.example/")),
						score: None,
					})
					.collect()
			})
			.unwrap_or_default();

		Box::pin(async move { Ok(hits) })
	}
}

#[tokio::test(start_paused = true)]
async fn tab_group_mode_lists_members_up_to_its_own_limit() {
	let mut controller = super::controller(Collaborators {
		tab_groups: Some(Arc::new(GroupMembers(45))),
		..Default::default()
	});
	let scope = TabGroupRef { id: Uuid::new_v4(), title: "Research".to_string() };

	controller.set_mode(Mode::TabGroup(scope));
	super::settle(&mut controller).await;

	assert_eq!(controller.limit(), 40);
	assert_eq!(controller.results().len(), 40);
	assert!(controller.results().iter().all(|c| c.kind() == SourceKind::TabGroup));
	assert_eq!(controller.selected_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn custom_view_has_no_search_or_create_note() {
	let search_engine = ScriptedSearchEngine::always(Step::ok(vec![omnibox_testkit::suggestion(
		"abc search",
		5.0,
	)]));
	let mut controller = super::controller(Collaborators {
		history: Some(super::history(vec![omnibox_testkit::visit(
			"https://xyz.com/abc",
			Some("Page about abc"),
			4.0,
		)])),
		search_engine: Some(search_engine.clone()),
		..Default::default()
	});

	controller.set_mode(Mode::CustomView);
	controller.set_query("abc");
	super::settle(&mut controller).await;

	assert_eq!(search_engine.calls(), 0);
	assert!(!controller.can_create_note());
	assert_eq!(super::texts(&controller), ["xyz.com/abc"]);
	// Only the general mode may rest without a selected row.
	assert_eq!(controller.selected_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn switching_to_the_same_mode_is_a_no_op() {
	let mut controller = super::controller(Collaborators::default());

	controller.set_query("abc");
	super::settle(&mut controller).await;

	let generation = controller.generation();

	controller.set_mode(Mode::General);

	assert_eq!(controller.generation(), generation);
	assert_eq!(super::texts(&controller), ["abc"]);

	controller.set_mode(Mode::NoteCreation);

	assert_eq!(controller.generation(), generation + 1);
	assert!(controller.results().is_empty());
}
