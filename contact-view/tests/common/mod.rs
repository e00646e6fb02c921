#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use contact_core::{CommunicationRecord, ContactSnapshot, RecordPayload, TodoItem};

pub fn record(id: &str, day: u32, payload: RecordPayload) -> CommunicationRecord {
    let at = Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).single();
    CommunicationRecord::new(id, at, payload)
}

pub fn mixed_records() -> Vec<CommunicationRecord> {
    vec![
        record(
            "1",
            10,
            RecordPayload::Email {
                subject: Some("Welcome".into()),
                body: Some("Hi there".into()),
            },
        ),
        record(
            "2",
            11,
            RecordPayload::Text {
                message: Some("See you soon".into()),
            },
        ),
        record(
            "3",
            12,
            RecordPayload::Call {
                duration_minutes: Some(20.0),
                notes: None,
            },
        ),
        record(
            "4",
            13,
            RecordPayload::Note {
                text: Some("Likes <b>bold</b> coffee & tea".into()),
            },
        ),
        record(
            "5",
            14,
            RecordPayload::Unrecognized {
                raw_kind: "unknown".into(),
                text: Some("Met at conference".into()),
            },
        ),
        record(
            "6",
            15,
            RecordPayload::Email {
                subject: Some("Follow up".into()),
                body: None,
            },
        ),
    ]
}

pub fn todo(id: &str, text: &str, is_complete: bool) -> TodoItem {
    TodoItem {
        id: id.into(),
        text: text.into(),
        is_complete,
        due_date: None,
    }
}

pub fn snapshot() -> ContactSnapshot {
    ContactSnapshot::new(
        mixed_records(),
        vec![todo("10", "Send quote", false), todo("11", "Call back", true)],
    )
}
