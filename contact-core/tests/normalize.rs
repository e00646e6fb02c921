use chrono::{TimeZone, Utc};
use contact_core::{
    normalize_records, CommunicationRecord, DisplayEntry, EntryKind, Normalize, RecordKind,
    RecordPayload, ViewConfig, ELLIPSIS,
};
use pretty_assertions::assert_eq;

fn record(id: &str, payload: RecordPayload) -> CommunicationRecord {
    let at = Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).single();
    CommunicationRecord::new(id, at, payload)
}

fn email(subject: &str, body: &str) -> RecordPayload {
    RecordPayload::Email {
        subject: Some(subject.to_string()),
        body: Some(body.to_string()),
    }
}

#[test]
fn welcome_email_gets_subject_and_ellipsis() {
    let entry = record("1", email("Welcome", "Hi there")).normalize(&ViewConfig::default());

    assert_eq!(entry.title, "Email");
    assert_eq!(entry.primary_line.as_deref(), Some("Subject: Welcome"));
    assert_eq!(entry.secondary_line.as_deref(), Some("Hi there..."));
    assert!(entry.secondary_line.unwrap().ends_with(ELLIPSIS));
    assert_eq!(entry.occurred_at_label, "2024-03-14");
    assert_eq!(entry.icon_kind, RecordKind::Email);
}

#[test]
fn long_email_body_is_cut_at_configured_width() {
    let body = "x".repeat(200);
    let entry = record("1", email("Quote", &body)).normalize(&ViewConfig::default());
    let excerpt = entry.secondary_line.expect("excerpt");

    assert_eq!(excerpt.chars().count(), 80 + ELLIPSIS.chars().count());

    let narrow = ViewConfig {
        excerpt_chars: 5,
        ..ViewConfig::default()
    };
    let entry = record("1", email("Quote", "héllo wörld")).normalize(&narrow);
    assert_eq!(entry.secondary_line.as_deref(), Some("héllo..."));
}

#[test]
fn text_and_note_have_no_secondary_line() {
    let config = ViewConfig::default();
    let text = record(
        "t",
        RecordPayload::Text {
            message: Some("On my way".into()),
        },
    )
    .normalize(&config);
    let note = record(
        "n",
        RecordPayload::Note {
            text: Some("Prefers mornings".into()),
        },
    )
    .normalize(&config);

    assert_eq!(text.title, "Text");
    assert_eq!(text.primary_line.as_deref(), Some("On my way"));
    assert_eq!(text.secondary_line, None);
    assert_eq!(note.title, "Note");
    assert_eq!(note.primary_line.as_deref(), Some("Prefers mornings"));
    assert_eq!(note.secondary_line, None);
}

#[test]
fn call_shows_duration_and_optional_notes() {
    let config = ViewConfig::default();
    let with_notes = record(
        "c1",
        RecordPayload::Call {
            duration_minutes: Some(15.0),
            notes: Some("Discussed renewal".into()),
        },
    )
    .normalize(&config);
    let without_notes = record(
        "c2",
        RecordPayload::Call {
            duration_minutes: Some(2.5),
            notes: Some(String::new()),
        },
    )
    .normalize(&config);

    assert_eq!(with_notes.primary_line.as_deref(), Some("Duration: 15 min"));
    assert_eq!(with_notes.secondary_line.as_deref(), Some("Discussed renewal"));
    assert_eq!(without_notes.primary_line.as_deref(), Some("Duration: 2.5 min"));
    assert_eq!(without_notes.secondary_line, None);
}

#[test]
fn unrecognized_kind_falls_back_to_note_treatment() {
    let entry = record(
        "u",
        RecordPayload::Unrecognized {
            raw_kind: "meeting".into(),
            text: Some("Lunch at noon".into()),
        },
    )
    .normalize(&ViewConfig::default());

    assert_eq!(entry.icon_kind, RecordKind::Note);
    assert_eq!(entry.kind, EntryKind::Other("meeting".into()));
    assert_eq!(entry.title, "Meeting");
    assert_eq!(entry.primary_line.as_deref(), Some("Lunch at noon"));
}

#[test]
fn malformed_payload_renders_present_fields_only() {
    let entry = record(
        "bad",
        RecordPayload::Email {
            subject: None,
            body: Some("Body only".into()),
        },
    )
    .normalize(&ViewConfig::default());

    assert_eq!(entry.primary_line, None);
    assert_eq!(entry.secondary_line.as_deref(), Some("Body only..."));

    let undated = CommunicationRecord::new("nodate", None, RecordPayload::Note { text: None })
        .normalize(&ViewConfig::default());
    assert_eq!(undated.occurred_at_label, "--");
    assert_eq!(undated.primary_line, None);
}

#[test]
fn renormalizing_is_a_no_op_for_every_kind() {
    let config = ViewConfig::default();
    let records = vec![
        record("e", email("Hello", "Body")),
        record(
            "t",
            RecordPayload::Text {
                message: Some("hi".into()),
            },
        ),
        record(
            "c",
            RecordPayload::Call {
                duration_minutes: Some(3.0),
                notes: None,
            },
        ),
        record(
            "n",
            RecordPayload::Note {
                text: Some("memo".into()),
            },
        ),
    ];

    let once: Vec<DisplayEntry> = normalize_records(&records, &config);
    let twice: Vec<DisplayEntry> = once.iter().map(|entry| entry.normalize(&config)).collect();

    assert_eq!(once, twice);
    assert_eq!(
        once.iter().map(|entry| entry.kind.as_tag()).collect::<Vec<_>>(),
        vec!["email", "text", "call", "note"]
    );
}

#[test]
fn invalid_date_format_falls_back_to_iso() {
    let config = ViewConfig {
        date_format: "%Q".into(),
        ..ViewConfig::default()
    };
    let entry = record("1", email("a", "b")).normalize(&config);
    assert_eq!(entry.occurred_at_label, "2024-03-14");
}
