use noteboard_core::db::open_db_in_memory;
use noteboard_core::{
    EntryDraft, EntryKind, EntryListQuery, EntryPatch, EntryRepository, EntryRow,
    EntryValidationError, RepoError, SqliteEntryRepository,
};
use uuid::Uuid;

#[test]
fn insert_assigns_id_rank_and_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let draft = EntryDraft::new(EntryKind::Note, "first note", 200, 60);
    let entry = repo.insert_entry(&draft).unwrap();

    assert!(!entry.id.is_nil());
    assert_eq!(entry.order_rank, 0);
    assert_eq!(entry.to_draft(), draft);
    assert!(entry.is_active());
    assert!(entry.created_at > 0);
    assert_eq!(entry.created_at, entry.updated_at);
}

#[test]
fn insert_rejects_non_positive_size() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let err = repo
        .insert_entry(&EntryDraft::new(EntryKind::Task, "bad", 0, 60))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EntryValidationError::NonPositiveWidth(0))
    ));
}

#[test]
fn update_writes_only_patched_fields_and_stamps_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    let entry = repo
        .insert_entry(&EntryDraft::new(EntryKind::Task, "draft", 200, 60))
        .unwrap();

    let updated = repo
        .update_entry(entry.id, &EntryPatch::done(true), 42)
        .unwrap();

    assert!(updated.is_done);
    assert_eq!(updated.content, "draft");
    assert_eq!(updated.height, 60);
    assert_eq!(updated.updated_at, 42);
    assert_eq!(updated.created_at, entry.created_at);
}

#[test]
fn update_missing_entry_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    let missing = Uuid::new_v4();

    let err = repo
        .update_entry(missing, &EntryPatch::content("x"), 1)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));

    let err = repo.set_deleted_at(missing, Some(1)).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn list_hides_tombstoned_rows_unless_asked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    let kept = repo
        .insert_entry(&EntryDraft::new(EntryKind::Note, "kept", 200, 60))
        .unwrap();
    let gone = repo
        .insert_entry(&EntryDraft::new(EntryKind::Task, "gone", 200, 60))
        .unwrap();
    repo.set_deleted_at(gone.id, Some(5)).unwrap();

    let visible = repo.list_entries(&EntryListQuery::default()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, kept.id);

    let all = repo
        .list_entries(&EntryListQuery {
            include_deleted: true,
            ..EntryListQuery::default()
        })
        .unwrap();
    assert_eq!(all.len(), 2);

    assert!(repo.get_entry(gone.id, false).unwrap().is_none());
    let tombstone = repo.get_entry(gone.id, true).unwrap().unwrap();
    assert_eq!(tombstone.deleted_at, Some(5));
}

#[test]
fn list_filters_by_kind() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    repo.insert_entry(&EntryDraft::new(EntryKind::Note, "note", 200, 60))
        .unwrap();
    let task = repo
        .insert_entry(&EntryDraft::new(EntryKind::Task, "task", 200, 60))
        .unwrap();

    let tasks = repo
        .list_entries(&EntryListQuery {
            kind: Some(EntryKind::Task),
            ..EntryListQuery::default()
        })
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task.id);
}

#[test]
fn upsert_rewrites_existing_rows_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    let a = repo
        .insert_entry(&EntryDraft::new(EntryKind::Note, "a", 200, 60))
        .unwrap();
    let b = repo
        .insert_entry(&EntryDraft::new(EntryKind::Note, "b", 200, 60))
        .unwrap();

    let mut row_a = EntryRow::from(&a);
    row_a.order_rank = 1;
    let mut row_b = EntryRow::from(&b);
    row_b.order_rank = 0;
    repo.upsert_entries(&[row_a, row_b]).unwrap();

    let listed = repo.list_entries(&EntryListQuery::default()).unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[test]
fn upsert_with_unknown_kind_applies_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::new(&conn);
    let a = repo
        .insert_entry(&EntryDraft::new(EntryKind::Note, "a", 200, 60))
        .unwrap();

    let mut good = EntryRow::from(&a);
    good.order_rank = 9;
    let mut bad = EntryRow::from(&a);
    bad.id = Uuid::new_v4().to_string();
    bad.kind = "event".to_string();

    let err = repo.upsert_entries(&[good, bad]).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert_eq!(repo.get_entry(a.id, false).unwrap().unwrap().order_rank, 0);
}

#[test]
fn invalid_persisted_kind_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO entries (id, kind) VALUES (?1, 'event');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();
    let repo = SqliteEntryRepository::new(&conn);

    let err = repo.list_entries(&EntryListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("event")));
}
