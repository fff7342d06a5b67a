use ds_core::{
	editor::{Decision, DirtyState, EditSession, MetadataChange, Navigation},
	Error,
};

use tracing_test::traced_test;

mod common;

use common::{docshelf, key, library, resource, MockBackend, USER};

fn session(backend: &std::sync::Arc<MockBackend>) -> EditSession {
	docshelf(backend).edit_session().unwrap()
}

#[tokio::test]
#[traced_test]
async fn open_takes_marker_and_close_releases_it() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);
	let math = key("repo1", "school/math.md");

	let opened = editor.open(math.clone()).await.unwrap();
	assert_eq!(opened.data.as_deref(), Some("algebra"));
	assert_eq!(editor.content(), Some("algebra"));
	assert_eq!(editor.state(), DirtyState::Clean);
	assert_eq!(backend.editor_of(&math).as_deref(), Some(USER));

	let fetch = backend.state().searches.last().cloned().unwrap();
	assert!(fetch.with_data);
	assert_eq!(fetch.path.as_deref(), Some("school/math.md"));

	editor.close().await.unwrap();
	assert_eq!(editor.key(), None);
	assert_eq!(backend.editor_of(&math), None);
}

#[tokio::test]
#[traced_test]
async fn resource_held_by_another_user_is_a_conflict() {
	let backend = MockBackend::new(library());
	let math = key("repo1", "school/math.md");
	backend
		.state()
		.editing
		.insert(math.clone(), "bob".to_string());

	let mut editor = session(&backend);
	let err = editor.open(math.clone()).await.unwrap_err();

	assert!(err.is_conflict());
	assert!(matches!(err, Error::Conflict { ref holder, .. } if holder == "bob"));
	assert_eq!(editor.key(), None);
	assert_eq!(backend.editor_of(&math).as_deref(), Some("bob"));
	assert!(backend.state().searches.is_empty());
}

#[tokio::test]
#[traced_test]
async fn own_marker_can_be_reopened() {
	let backend = MockBackend::new(library());
	let math = key("repo1", "school/math.md");
	backend
		.state()
		.editing
		.insert(math.clone(), USER.to_string());

	let mut editor = session(&backend);
	editor.open(math.clone()).await.unwrap();
	assert_eq!(editor.key(), Some(&math));
}

#[tokio::test]
#[traced_test]
async fn missing_and_read_only_resources_are_refused() {
	let mut locked = resource("repo1", "locked.md", "secret", &[]);
	locked.is_editable = false;
	let backend = MockBackend::new([locked]);
	let mut editor = session(&backend);

	let err = editor.open(key("repo1", "ghost.md")).await.unwrap_err();
	assert!(err.is_not_found());

	let locked = key("repo1", "locked.md");
	let err = editor.open(locked.clone()).await.unwrap_err();
	assert!(matches!(err, Error::ReadOnly(_)));
	assert_eq!(backend.editor_of(&locked), None);
	assert_eq!(editor.key(), None);
}

#[tokio::test]
#[traced_test]
async fn select_edit_discard() {
	let backend = MockBackend::new([resource("repo1", "a.md", "A", &[])]);
	let mut editor = session(&backend);

	editor.open(key("repo1", "a.md")).await.unwrap();
	assert_eq!(editor.state(), DirtyState::Clean);

	assert_eq!(editor.edit("AB").unwrap(), DirtyState::Dirty);

	editor.discard().unwrap();
	assert_eq!(editor.content(), Some("A"));
	assert_eq!(editor.state(), DirtyState::Clean);
}

#[tokio::test]
#[traced_test]
async fn successful_save_becomes_clean() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);
	let readme = key("repo1", "readme.md");

	editor.open(readme.clone()).await.unwrap();
	editor.edit("# Readme\nupdated").unwrap();
	editor.save().await.unwrap();

	assert_eq!(editor.state(), DirtyState::Clean);
	assert_eq!(backend.data(&readme).as_deref(), Some("# Readme\nupdated"));
	assert_eq!(
		editor.current().unwrap().data.as_deref(),
		Some("# Readme\nupdated")
	);

	let update = backend.state().updates.last().cloned().unwrap();
	assert_eq!(update.user_id.as_deref(), Some(USER));
	assert_eq!(update.path, "readme.md");
}

#[tokio::test]
#[traced_test]
async fn failed_save_stays_dirty() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);
	let readme = key("repo1", "readme.md");

	editor.open(readme.clone()).await.unwrap();
	editor.edit("lost?").unwrap();

	backend.fail("update");
	assert!(editor.save().await.is_err());
	assert_eq!(editor.state(), DirtyState::Dirty);
	assert_eq!(editor.content(), Some("lost?"));
	assert_eq!(backend.data(&readme).as_deref(), Some("# Readme"));

	backend.recover("update");
	editor.save().await.unwrap();
	assert_eq!(editor.state(), DirtyState::Clean);
}

#[tokio::test]
#[traced_test]
async fn unsaved_changes_block_navigation() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);
	let readme = key("repo1", "readme.md");
	let math = key("repo1", "school/math.md");

	editor.open(readme.clone()).await.unwrap();
	editor.edit("changed").unwrap();

	assert!(matches!(
		editor.open(math.clone()).await,
		Err(Error::UnsavedChanges(_))
	));
	assert!(matches!(editor.close().await, Err(Error::UnsavedChanges(_))));
	assert_eq!(backend.editor_of(&readme).as_deref(), Some(USER));

	assert_eq!(
		editor.confirm_discard_or_save(Decision::Cancel).await.unwrap(),
		Navigation::Stay
	);
	assert!(editor.is_dirty());

	assert_eq!(
		editor.confirm_discard_or_save(Decision::Discard).await.unwrap(),
		Navigation::Proceed
	);
	assert_eq!(editor.content(), Some("# Readme"));

	editor.open(math.clone()).await.unwrap();
	assert_eq!(editor.key(), Some(&math));
	assert_eq!(backend.editor_of(&readme), None);
	assert_eq!(backend.editor_of(&math).as_deref(), Some(USER));
}

#[tokio::test]
#[traced_test]
async fn leave_with_save() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);
	let plan = key("repo2", "work/plan.md");

	editor.open(plan.clone()).await.unwrap();
	editor.edit("q4 plan").unwrap();

	backend.fail("update");
	assert!(editor.leave(Decision::Save).await.is_err());
	assert_eq!(editor.key(), Some(&plan));

	backend.recover("update");
	assert_eq!(
		editor.leave(Decision::Save).await.unwrap(),
		Navigation::Proceed
	);
	assert_eq!(editor.key(), None);
	assert_eq!(backend.data(&plan).as_deref(), Some("q4 plan"));
	assert_eq!(backend.editor_of(&plan), None);
}

#[tokio::test]
#[traced_test]
async fn clean_document_proceeds_without_saving() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);

	assert_eq!(
		editor.confirm_discard_or_save(Decision::Cancel).await.unwrap(),
		Navigation::Proceed
	);

	editor.open(key("repo1", "readme.md")).await.unwrap();
	assert_eq!(
		editor.leave(Decision::Cancel).await.unwrap(),
		Navigation::Proceed
	);
	assert!(backend.state().updates.is_empty());
}

#[tokio::test]
#[traced_test]
async fn metadata_updates_go_through_update() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);
	let math = key("repo1", "school/math.md");

	editor.open(math.clone()).await.unwrap();
	editor
		.update_metadata(MetadataChange {
			tags_to_add: vec!["exam".into()],
			tags_to_remove: vec!["school".into()],
			category: Some("revision".into()),
			..Default::default()
		})
		.await
		.unwrap();

	let current = editor.current().unwrap();
	assert_eq!(current.category.as_deref(), Some("revision"));
	assert_eq!(current.tags.keys().collect::<Vec<_>>(), ["exam"]);

	let state = backend.state();
	let stored = &state.resources[&math];
	assert!(stored.tags.contains_key("exam"));
	assert!(!stored.tags.contains_key("school"));
	assert_eq!(state.updates.last().unwrap().data, None);
}

#[tokio::test]
#[traced_test]
async fn editing_without_open_resource_fails() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);

	assert!(matches!(editor.edit("x"), Err(Error::NoOpenResource)));
	assert!(matches!(editor.save().await, Err(Error::NoOpenResource)));
	editor.close().await.unwrap();
}

#[tokio::test]
#[traced_test]
async fn replacing_tags_is_visible_on_open_resource() {
	let backend = MockBackend::new(library());
	let mut editor = session(&backend);
	let draft = key("repo1", "school/draft.md");

	editor.open(draft.clone()).await.unwrap();
	editor
		.update_metadata(MetadataChange {
			tags_to_set: vec!["final".into(), "school".into()],
			..Default::default()
		})
		.await
		.unwrap();

	let local = editor.current().unwrap().tags.clone();
	assert_eq!(local.keys().collect::<Vec<_>>(), ["final", "school"]);
	assert_eq!(local, backend.state().resources[&draft].tags);
	assert_eq!(editor.current().unwrap().category, None);
}
