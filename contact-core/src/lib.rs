//! Core model for a contact's communication feed and action items.

mod normalize;

pub use normalize::{normalize_records, Normalize, ELLIPSIS};

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Date format used when the configured one cannot be rendered.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Label shown in place of a missing timestamp.
pub const MISSING_TIMESTAMP_LABEL: &str = "--";

/// Rendering knobs shared by the normalizer and the view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewConfig {
    /// Number of characters of an email body kept in its excerpt line.
    pub excerpt_chars: usize,
    /// chrono strftime pattern for timestamps and due dates.
    pub date_format: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: 80,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ViewConfig {
    /// Formats a calendar date, falling back to ISO when `date_format` is invalid.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            out.clear();
            out.push_str(&date.format(DEFAULT_DATE_FORMAT).to_string());
        }
        out
    }

    /// Date-only label for an instant; `--` when absent.
    pub fn format_timestamp(&self, timestamp: Option<DateTime<Utc>>) -> String {
        timestamp
            .map(|dt| self.format_date(dt.date_naive()))
            .unwrap_or_else(|| MISSING_TIMESTAMP_LABEL.to_string())
    }
}

/// Closed set of communication kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Email,
    Text,
    Call,
    Note,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Email,
        RecordKind::Text,
        RecordKind::Call,
        RecordKind::Note,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Email => "email",
            RecordKind::Text => "text",
            RecordKind::Call => "call",
            RecordKind::Note => "note",
        }
    }

    /// Heading shown on a feed entry.
    pub fn title(self) -> &'static str {
        match self {
            RecordKind::Email => "Email",
            RecordKind::Text => "Text",
            RecordKind::Call => "Call",
            RecordKind::Note => "Note",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ContactError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ContactError::UnknownCategory(value.to_string()))
    }
}

/// Filter tag carried by every rendered feed entry.
///
/// Records of a kind outside [`RecordKind`] keep their raw tag, so they only
/// show up under the `all` filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntryKind {
    Known(RecordKind),
    Other(String),
}

impl EntryKind {
    pub fn as_tag(&self) -> &str {
        match self {
            EntryKind::Known(kind) => kind.as_str(),
            EntryKind::Other(raw) => raw,
        }
    }

    pub fn is(&self, kind: RecordKind) -> bool {
        matches!(self, EntryKind::Known(own) if *own == kind)
    }
}

/// Kind-specific content of a communication record.
///
/// Every field is optional so that a record missing a field required by its
/// kind can still be carried and rendered with what it has.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordPayload {
    Email {
        subject: Option<String>,
        body: Option<String>,
    },
    Text {
        message: Option<String>,
    },
    Call {
        duration_minutes: Option<f64>,
        notes: Option<String>,
    },
    Note {
        text: Option<String>,
    },
    /// A kind this build does not know about; rendered like a note.
    Unrecognized {
        raw_kind: String,
        text: Option<String>,
    },
}

impl RecordPayload {
    pub fn entry_kind(&self) -> EntryKind {
        match self {
            RecordPayload::Email { .. } => EntryKind::Known(RecordKind::Email),
            RecordPayload::Text { .. } => EntryKind::Known(RecordKind::Text),
            RecordPayload::Call { .. } => EntryKind::Known(RecordKind::Call),
            RecordPayload::Note { .. } => EntryKind::Known(RecordKind::Note),
            RecordPayload::Unrecognized { raw_kind, .. } => EntryKind::Other(raw_kind.clone()),
        }
    }
}

/// One logged interaction with the contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunicationRecord {
    pub id: String,
    pub occurred_at: Option<DateTime<Utc>>,
    pub payload: RecordPayload,
}

impl CommunicationRecord {
    pub fn new(
        id: impl Into<String>,
        occurred_at: Option<DateTime<Utc>>,
        payload: RecordPayload,
    ) -> Self {
        Self {
            id: id.into(),
            occurred_at,
            payload,
        }
    }

    pub fn entry_kind(&self) -> EntryKind {
        self.payload.entry_kind()
    }
}

/// Feed order: newest first, undated last, ties broken by ascending id.
pub fn display_order(a: &CommunicationRecord, b: &CommunicationRecord) -> Ordering {
    let by_time = match (a.occurred_at, b.occurred_at) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time.then_with(|| a.id.cmp(&b.id))
}

/// Follow-up action item attached to the contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Read-only data handed over by the host when the view loads.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContactSnapshot {
    pub records: Vec<CommunicationRecord>,
    pub todos: Vec<TodoItem>,
}

impl ContactSnapshot {
    /// Builds a snapshot with records in feed order; todos keep their order.
    pub fn new(mut records: Vec<CommunicationRecord>, todos: Vec<TodoItem>) -> Self {
        records.sort_by(display_order);
        Self { records, todos }
    }

    pub fn timeline(&self) -> &[CommunicationRecord] {
        &self.records
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }
}

/// Render-ready projection of a [`CommunicationRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayEntry {
    pub id: String,
    pub kind: EntryKind,
    pub occurred_at_label: String,
    /// Visual treatment; unrecognized kinds use [`RecordKind::Note`].
    pub icon_kind: RecordKind,
    pub title: String,
    pub primary_line: Option<String>,
    pub secondary_line: Option<String>,
}

/// Feed filter selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    #[default]
    All,
    Email,
    Text,
    Call,
    Note,
}

impl FilterCategory {
    /// Button order in the filter bar.
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::All,
        FilterCategory::Email,
        FilterCategory::Text,
        FilterCategory::Call,
        FilterCategory::Note,
    ];

    pub fn as_str(self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.as_str(),
            None => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterCategory::All => "All",
            FilterCategory::Email => "Emails",
            FilterCategory::Text => "Texts",
            FilterCategory::Call => "Calls",
            FilterCategory::Note => "Notes",
        }
    }

    pub fn kind(self) -> Option<RecordKind> {
        match self {
            FilterCategory::All => None,
            FilterCategory::Email => Some(RecordKind::Email),
            FilterCategory::Text => Some(RecordKind::Text),
            FilterCategory::Call => Some(RecordKind::Call),
            FilterCategory::Note => Some(RecordKind::Note),
        }
    }

    /// Whether an entry with this tag stays visible under the filter.
    pub fn admits(self, tag: &EntryKind) -> bool {
        match self.kind() {
            None => true,
            Some(kind) => tag.is(kind),
        }
    }
}

impl From<RecordKind> for FilterCategory {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Email => FilterCategory::Email,
            RecordKind::Text => FilterCategory::Text,
            RecordKind::Call => FilterCategory::Call,
            RecordKind::Note => FilterCategory::Note,
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = ContactError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(FilterCategory::All);
        }
        value.parse::<RecordKind>().map(FilterCategory::from)
    }
}

/// Errors raised while loading contact data.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("input is missing the minimum required data")]
    MissingData,
    #[error("could not read contact data: {0}")]
    Parse(String),
    #[error("unknown filter category `{0}`")]
    UnknownCategory(String),
}

/// Empty snapshot, handy for mocks and tests.
pub fn empty_snapshot() -> ContactSnapshot {
    ContactSnapshot::default()
}
