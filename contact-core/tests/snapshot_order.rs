use chrono::{TimeZone, Utc};
use contact_core::{
    CommunicationRecord, ContactError, ContactSnapshot, EntryKind, FilterCategory, RecordKind,
    RecordPayload, TodoItem,
};
use pretty_assertions::assert_eq;

fn note(id: &str, day: Option<u32>) -> CommunicationRecord {
    let at = day.and_then(|day| Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).single());
    CommunicationRecord::new(id, at, RecordPayload::Note { text: None })
}

fn todo(id: &str) -> TodoItem {
    TodoItem {
        id: id.to_string(),
        text: format!("todo {id}"),
        is_complete: false,
        due_date: None,
    }
}

#[test]
fn records_sort_newest_first_with_id_tiebreak() {
    let snapshot = ContactSnapshot::new(
        vec![
            note("b", Some(2)),
            note("z", None),
            note("c", Some(9)),
            note("a", Some(2)),
        ],
        vec![todo("2"), todo("1")],
    );

    let ids: Vec<&str> = snapshot.timeline().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b", "z"]);

    let todo_ids: Vec<&str> = snapshot.todos().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(todo_ids, vec!["2", "1"]);
}

#[test]
fn filter_categories_parse_and_admit() {
    assert_eq!("all".parse::<FilterCategory>().unwrap(), FilterCategory::All);
    assert_eq!(" Email ".parse::<FilterCategory>().unwrap(), FilterCategory::Email);
    assert!(matches!(
        "fax".parse::<FilterCategory>(),
        Err(ContactError::UnknownCategory(raw)) if raw == "fax"
    ));

    let unknown = EntryKind::Other("meeting".into());
    assert!(FilterCategory::All.admits(&unknown));
    assert!(!FilterCategory::Note.admits(&unknown));
    assert!(FilterCategory::Call.admits(&EntryKind::Known(RecordKind::Call)));
    assert!(!FilterCategory::Call.admits(&EntryKind::Known(RecordKind::Text)));
}

#[test]
fn entry_kind_serializes_as_plain_tag() {
    let known = serde_json::to_value(EntryKind::Known(RecordKind::Email)).unwrap();
    let other = serde_json::to_value(EntryKind::Other("fax".into())).unwrap();
    assert_eq!(known, serde_json::json!("email"));
    assert_eq!(other, serde_json::json!("fax"));

    let parsed: EntryKind = serde_json::from_value(serde_json::json!("call")).unwrap();
    assert_eq!(parsed, EntryKind::Known(RecordKind::Call));
}
