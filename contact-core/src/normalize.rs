use crate::{CommunicationRecord, DisplayEntry, EntryKind, RecordKind, RecordPayload, ViewConfig};

/// Suffix appended to every email excerpt, truncated or not.
pub const ELLIPSIS: &str = "...";

/// Projection into a [`DisplayEntry`]. Pure and deterministic.
pub trait Normalize {
    fn normalize(&self, config: &ViewConfig) -> DisplayEntry;
}

impl Normalize for CommunicationRecord {
    fn normalize(&self, config: &ViewConfig) -> DisplayEntry {
        let kind = self.entry_kind();
        let (icon_kind, title) = match &kind {
            EntryKind::Known(known) => (*known, known.title().to_string()),
            EntryKind::Other(raw) if raw.trim().is_empty() => {
                (RecordKind::Note, RecordKind::Note.title().to_string())
            }
            EntryKind::Other(raw) => (RecordKind::Note, capitalize_first(raw)),
        };

        let (primary_line, secondary_line) = match &self.payload {
            RecordPayload::Email { subject, body } => (
                subject.as_ref().map(|subject| format!("Subject: {subject}")),
                body.as_deref()
                    .map(|body| excerpt(body, config.excerpt_chars)),
            ),
            RecordPayload::Text { message } => (message.clone(), None),
            RecordPayload::Call {
                duration_minutes,
                notes,
            } => (
                duration_minutes.map(|minutes| format!("Duration: {minutes} min")),
                notes.clone().filter(|notes| !notes.is_empty()),
            ),
            RecordPayload::Note { text } | RecordPayload::Unrecognized { text, .. } => {
                (text.clone(), None)
            }
        };

        DisplayEntry {
            id: self.id.clone(),
            kind,
            occurred_at_label: config.format_timestamp(self.occurred_at),
            icon_kind,
            title,
            primary_line,
            secondary_line,
        }
    }
}

impl Normalize for DisplayEntry {
    fn normalize(&self, _: &ViewConfig) -> DisplayEntry {
        self.clone()
    }
}

/// Normalizes a whole feed, keeping its order.
pub fn normalize_records(records: &[CommunicationRecord], config: &ViewConfig) -> Vec<DisplayEntry> {
    records
        .iter()
        .map(|record| record.normalize(config))
        .collect()
}

fn excerpt(body: &str, max_chars: usize) -> String {
    let mut out: String = body.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}

fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
