use noteboard_core::{Entry, EntryKind, EntryPatch, EntryRow};
use uuid::Uuid;

fn sample() -> Entry {
    Entry {
        id: Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        kind: EntryKind::Task,
        content: "- call mom".to_string(),
        is_done: true,
        order_rank: 4,
        width: 200,
        height: 120,
        deleted_at: Some(1_700_000_000_000),
        created_at: 1_600_000_000_000,
        updated_at: 1_650_000_000_000,
    }
}

#[test]
fn entry_serializes_with_camel_cased_fields() {
    let json = serde_json::to_value(sample()).unwrap();

    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["kind"], "task");
    assert_eq!(json["isDone"], true);
    assert_eq!(json["orderRank"], 4);
    assert_eq!(json["deletedAt"], 1_700_000_000_000_i64);
    assert_eq!(json["createdAt"], 1_600_000_000_000_i64);
    assert!(json.get("is_done").is_none());
}

#[test]
fn row_uses_column_names_and_maps_back_losslessly() {
    let entry = sample();
    let row = EntryRow::from(&entry);
    let json = serde_json::to_value(&row).unwrap();

    assert_eq!(json["is_done"], true);
    assert_eq!(json["order_rank"], 4);
    assert_eq!(json["deleted_at"], 1_700_000_000_000_i64);
    assert_eq!(json["updated_at"], 1_650_000_000_000_i64);

    assert_eq!(Entry::try_from(row).unwrap(), entry);
}

#[test]
fn row_with_unknown_kind_or_bad_id_is_rejected() {
    let mut row = EntryRow::from(&sample());
    row.kind = "event".to_string();
    assert!(Entry::try_from(row.clone()).is_err());

    row.kind = "note".to_string();
    row.id = "not-a-uuid".to_string();
    let err = Entry::try_from(row).unwrap_err();
    assert!(err.to_string().contains("not-a-uuid"));
}

#[test]
fn patch_serialization_skips_absent_fields() {
    let json = serde_json::to_value(EntryPatch::content("new text")).unwrap();
    assert_eq!(json, serde_json::json!({ "content": "new text" }));

    let decoded: EntryPatch = serde_json::from_str(r#"{"isDone":true}"#).unwrap();
    assert_eq!(decoded, EntryPatch::done(true));
}

#[test]
fn soft_delete_and_restore_toggle_visibility() {
    let mut entry = sample();
    entry.restore();
    assert!(entry.is_active());

    entry.soft_delete(10);
    assert_eq!(entry.deleted_at, Some(10));
    assert!(!entry.is_active());
}
