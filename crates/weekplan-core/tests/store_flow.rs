use std::fs;
use std::path::Path;

use tempfile::tempdir;
use uuid::Uuid;
use weekplan_core::store::{Mutation, Rejection, TaskStore};
use weekplan_core::task::{Day, WEEK};
use weekplan_core::view::Filter;

fn open(dir: &Path) -> TaskStore {
    TaskStore::open(dir).expect("open task store")
}

fn last_id(store: &TaskStore) -> Uuid {
    store.tasks().last().expect("at least one task").id
}

fn snapshot(store: &TaskStore) -> String {
    serde_json::to_string(store.tasks()).expect("serialize tasks")
}

#[test]
fn add_increases_day_count_and_starts_pending() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    assert_eq!(store.count_for_day(Day::Monday), 0);

    let outcome = store.add_task("Buy milk", Day::Monday).expect("add");
    assert_eq!(outcome, Mutation::Applied);
    assert_eq!(store.count_for_day(Day::Monday), 1);
    assert_eq!(store.count_for_day(Day::Tuesday), 0);

    let task = store.tasks().last().expect("task present");
    assert!(!task.completed);
    assert_eq!(task.text, "Buy milk");
    assert_eq!(task.day, Day::Monday);
}

#[test]
fn blank_text_is_rejected_without_mutation() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    let outcome = store.add_task("", Day::Monday).expect("add");
    assert_eq!(outcome, Mutation::Rejected(Rejection::EmptyText));

    let outcome = store.add_task("   ", Day::Monday).expect("add");
    assert_eq!(outcome, Mutation::Rejected(Rejection::EmptyText));

    assert!(store.tasks().is_empty());
}

#[test]
fn text_is_trimmed_on_add_and_edit() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    assert!(store.add_task("  Buy milk  ", Day::Monday).expect("add").applied());
    assert_eq!(store.tasks()[0].text, "Buy milk");

    let id = last_id(&store);
    assert!(store.edit_task(id, "  Buy bread  ").expect("edit").applied());
    assert_eq!(store.tasks()[0].text, "Buy bread");
}

#[test]
fn duplicate_detection_is_case_insensitive_per_day() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    assert!(store.add_task("Buy milk", Day::Monday).expect("add").applied());

    let outcome = store.add_task("buy milk", Day::Monday).expect("add");
    assert_eq!(outcome, Mutation::Rejected(Rejection::DuplicateText));
    assert_eq!(store.tasks().len(), 1);

    // Same text on a different day is a separate task.
    assert!(store.add_task("buy milk", Day::Tuesday).expect("add").applied());
    assert_eq!(store.tasks().len(), 2);
}

#[test]
fn toggle_twice_restores_and_unknown_id_changes_nothing() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Gym", Day::Monday).expect("add");
    let id = last_id(&store);

    store.toggle_task(id).expect("toggle");
    assert!(store.tasks()[0].completed);
    store.toggle_task(id).expect("toggle");
    assert!(!store.tasks()[0].completed);

    let before = snapshot(&store);
    store.toggle_task(Uuid::new_v4()).expect("toggle unknown");
    assert_eq!(snapshot(&store), before);
}

#[test]
fn edit_validates_within_the_targets_own_day() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Buy milk", Day::Monday).expect("add");
    let milk = last_id(&store);
    store.add_task("Walk dog", Day::Monday).expect("add");
    let dog = last_id(&store);
    store.add_task("Walk dog", Day::Tuesday).expect("add");

    let outcome = store.edit_task(milk, "").expect("edit");
    assert_eq!(outcome, Mutation::Rejected(Rejection::EmptyText));

    // Colliding with another Monday task, case-insensitively.
    let outcome = store.edit_task(milk, "walk DOG").expect("edit");
    assert_eq!(outcome, Mutation::Rejected(Rejection::DuplicateText));
    assert_eq!(store.find(milk).expect("still there").text, "Buy milk");

    // Re-saving a task's own text is not a collision with itself.
    let outcome = store.edit_task(dog, "Walk Dog").expect("edit");
    assert_eq!(outcome, Mutation::Applied);

    let outcome = store.edit_task(Uuid::new_v4(), "Anything").expect("edit");
    assert_eq!(outcome, Mutation::NotFound);
}

#[test]
fn delete_removes_only_the_matching_task() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Buy milk", Day::Monday).expect("add");
    let milk = last_id(&store);
    store.add_task("Walk dog", Day::Monday).expect("add");

    store.delete_task(milk).expect("delete");
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "Walk dog");

    let before = snapshot(&store);
    store.delete_task(Uuid::new_v4()).expect("delete unknown");
    assert_eq!(snapshot(&store), before);
}

#[test]
fn move_blocks_on_duplicate_in_target_day() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Gym", Day::Monday).expect("add");
    let monday_gym = last_id(&store);
    store.add_task("gym", Day::Tuesday).expect("add");

    let outcome = store.move_task(monday_gym, Day::Tuesday).expect("move");
    assert_eq!(outcome, Mutation::Rejected(Rejection::DuplicateText));
    assert_eq!(store.find(monday_gym).expect("still there").day, Day::Monday);

    let outcome = store.move_task(monday_gym, Day::Friday).expect("move");
    assert_eq!(outcome, Mutation::Applied);
    assert_eq!(store.find(monday_gym).expect("moved").day, Day::Friday);

    let outcome = store.move_task(Uuid::new_v4(), Day::Sunday).expect("move");
    assert_eq!(outcome, Mutation::NotFound);
}

#[test]
fn move_onto_own_day_is_idempotent() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Gym", Day::Monday).expect("add");
    let id = last_id(&store);

    let before = snapshot(&store);
    let outcome = store.move_task(id, Day::Monday).expect("move");
    assert_eq!(outcome, Mutation::Applied);
    assert_eq!(snapshot(&store), before);
}

#[test]
fn replicate_fills_only_free_days() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Gym", Day::Monday).expect("add");
    let id = last_id(&store);

    let created = store.replicate_to_all_days(id).expect("replicate");
    assert_eq!(created, 6);
    for day in WEEK {
        assert_eq!(store.count_for_day(day), 1);
    }

    // Every day already holds the text, including via differing case.
    let created = store.replicate_to_all_days(id).expect("replicate");
    assert_eq!(created, 0);

    // Free one day up again; replication fills only that gap.
    let sunday_copy = store
        .tasks_for_day(Day::Sunday)
        .first()
        .map(|task| task.id)
        .expect("sunday copy");
    store.delete_task(sunday_copy).expect("delete");

    let created = store.replicate_to_all_days(id).expect("replicate");
    assert_eq!(created, 1);
    assert_eq!(store.count_for_day(Day::Sunday), 1);
}

#[test]
fn replicated_siblings_start_pending_and_keep_the_source_intact() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Gym", Day::Monday).expect("add");
    let id = last_id(&store);
    store.toggle_task(id).expect("toggle");

    store.replicate_to_all_days(id).expect("replicate");

    let source = store.find(id).expect("source");
    assert!(source.completed);
    assert_eq!(source.day, Day::Monday);

    for task in store.tasks().iter().filter(|task| task.id != id) {
        assert!(!task.completed);
        assert_eq!(task.text, "Gym");
        assert_ne!(task.day, Day::Monday);
    }
}

#[test]
fn replicate_on_unknown_id_creates_nothing() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    let created = store.replicate_to_all_days(Uuid::new_v4()).expect("replicate");
    assert_eq!(created, 0);
    assert!(store.tasks().is_empty());
}

#[test]
fn collection_survives_reopen() {
    let temp = tempdir().expect("tempdir");

    {
        let mut store = open(temp.path());
        store.add_task("Buy milk", Day::Monday).expect("add");
        store.add_task("Gym", Day::Friday).expect("add");
        let id = last_id(&store);
        store.toggle_task(id).expect("toggle");
    }

    let store = open(temp.path());
    assert_eq!(store.tasks().len(), 2);
    assert_eq!(store.tasks()[0].text, "Buy milk");
    assert_eq!(store.tasks()[1].text, "Gym");
    assert!(store.tasks()[1].completed);
}

#[test]
fn corrupt_tasks_file_falls_back_to_empty() {
    let temp = tempdir().expect("tempdir");
    fs::write(temp.path().join("tasks.json"), "{not json").expect("write garbage");

    let mut store = open(temp.path());
    assert!(store.tasks().is_empty());

    // The store stays usable after recovery.
    assert!(store.add_task("Buy milk", Day::Monday).expect("add").applied());
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn dark_mode_preference_round_trips() {
    let temp = tempdir().expect("tempdir");
    let store = open(temp.path());

    assert!(!store.datastore().load_dark_mode());
    store.datastore().save_dark_mode(true).expect("save theme");
    assert!(store.datastore().load_dark_mode());

    fs::write(temp.path().join("theme.json"), "not a bool").expect("write garbage");
    assert!(!store.datastore().load_dark_mode());
}

#[test]
fn filtered_views_respect_completion() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("Gym", Day::Monday).expect("add");

    assert!(store.filtered_tasks_for_day(Day::Monday, Filter::Completed).is_empty());
    assert_eq!(store.filtered_tasks_for_day(Day::Monday, Filter::Pending).len(), 1);
    assert_eq!(store.filtered_tasks_for_day(Day::Monday, Filter::All).len(), 1);

    let id = last_id(&store);
    store.toggle_task(id).expect("toggle");

    assert_eq!(store.filtered_tasks_for_day(Day::Monday, Filter::Completed).len(), 1);
    assert!(store.filtered_tasks_for_day(Day::Monday, Filter::Pending).is_empty());
}

#[test]
fn queries_preserve_insertion_order() {
    let temp = tempdir().expect("tempdir");
    let mut store = open(temp.path());

    store.add_task("First", Day::Monday).expect("add");
    store.add_task("Second", Day::Monday).expect("add");
    store.add_task("Elsewhere", Day::Tuesday).expect("add");
    store.add_task("Third", Day::Monday).expect("add");

    let texts: Vec<&str> = store
        .tasks_for_day(Day::Monday)
        .iter()
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(texts, vec!["First", "Second", "Third"]);
}
