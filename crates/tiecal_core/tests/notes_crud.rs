use chrono::{TimeZone, Utc};
use std::collections::HashSet;
use tiecal_core::{
    bootstrap_store, Category, CategoryRef, CoreConfig, Note, NoteListing, NoteRepository,
    NoteServiceError, NoteValidationError, Store,
};
use uuid::Uuid;

fn seeded_store() -> Store {
    bootstrap_store(&CoreConfig::in_memory()).unwrap()
}

fn task_category(store: &Store) -> Category {
    store
        .category_service()
        .list_categories()
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Задача")
        .expect("seeded task category")
}

#[test]
fn empty_store_lists_the_empty_sentinel() {
    let store = seeded_store();
    let listing = store.note_service().list_notes().unwrap();
    assert_eq!(listing, NoteListing::Empty);
    assert!(listing.is_empty());
    assert_eq!(listing.len(), 0);
}

#[test]
fn note_with_empty_title_is_created_and_sorted_after_older_notes() {
    let store = seeded_store();
    let task = task_category(&store);

    let older = Note::new(
        "Old",
        "Written last year",
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        Some(task.id),
    )
    .unwrap();
    store.notes().create_note(&older).unwrap();

    let created = store
        .note_service()
        .create_note("", "Buy milk", task.id)
        .unwrap();
    assert_eq!(created.title, "");
    assert_eq!(created.category, Some(task.id));

    let listing = store.note_service().list_notes().unwrap();
    let ids: Vec<Uuid> = listing.entries().iter().map(|e| e.note.id).collect();
    assert_eq!(ids, vec![older.id, created.id]);
    assert_eq!(
        listing.entries()[1].category,
        CategoryRef::Assigned(task.clone())
    );
}

#[test]
fn created_note_date_matches_what_storage_returns() {
    let store = seeded_store();
    let task = task_category(&store);
    let before = Utc::now();

    let created = store
        .note_service()
        .create_note("t", "body", task.id)
        .unwrap();

    let reloaded = store.note_service().get_note(created.id).unwrap().unwrap();
    assert_eq!(reloaded, created);
    assert!(created.date >= before - chrono::TimeDelta::milliseconds(1));
    assert!(created.date <= Utc::now());
}

#[test]
fn consecutive_notes_get_distinct_ids() {
    let store = seeded_store();
    let task = task_category(&store);
    let service = store.note_service();

    let ids: HashSet<Uuid> = (0..20)
        .map(|i| service.create_note("", format!("note {i}"), task.id).unwrap().id)
        .collect();
    assert_eq!(ids.len(), 20);
    assert_eq!(service.list_notes().unwrap().len(), 20);
}

#[test]
fn empty_content_is_rejected_before_any_write() {
    let store = seeded_store();
    let task = task_category(&store);
    let mut sub = store.subscribe();

    let err = store
        .note_service()
        .create_note("Title only", "", task.id)
        .unwrap_err();

    assert!(err.is_validation());
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::EmptyContent)
    ));
    assert_eq!(store.notes().count_notes().unwrap(), 0);
    assert!(sub.drain().is_empty());
}

#[test]
fn unknown_category_is_rejected_before_any_write() {
    let store = seeded_store();
    let missing = Uuid::new_v4();

    let err = store
        .note_service()
        .create_note("", "Buy milk", missing)
        .unwrap_err();

    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::UnknownCategory(id)) if id == missing
    ));
    assert_eq!(store.notes().count_notes().unwrap(), 0);
}

#[test]
fn delete_removes_the_note_and_second_delete_is_not_found() {
    let store = seeded_store();
    let task = task_category(&store);
    let service = store.note_service();
    let keep = service.create_note("", "keep", task.id).unwrap();
    let drop_me = service.create_note("", "drop", task.id).unwrap();

    service.delete_note(drop_me.id).unwrap();

    let ids: Vec<Uuid> = service
        .list_notes()
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.note.id)
        .collect();
    assert_eq!(ids, vec![keep.id]);

    let err = service.delete_note(drop_me.id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(id) if id == drop_me.id));
    assert!(!err.is_validation());
}

#[test]
fn writes_publish_note_changes() {
    let store = seeded_store();
    let task = task_category(&store);
    let mut sub = store.subscribe();

    let note = store
        .note_service()
        .create_note("", "Buy milk", task.id)
        .unwrap();
    assert!(sub.drain().notes);

    store.note_service().delete_note(note.id).unwrap();
    let pending = sub.drain();
    assert!(pending.notes);
    assert!(!pending.categories);
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let category_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let note = Note::new(
        "",
        "Buy milk",
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
        Some(category_id),
    )
    .unwrap();

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["title"], "");
    assert_eq!(json["content"], "Buy milk");
    assert_eq!(json["category"], category_id.to_string());
    assert_eq!(json["date"], "2026-10-18T12:00:00Z");

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}
