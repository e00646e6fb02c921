//! Lenient JSON ingestion for the contact view.
//!
//! Hosts hand over whatever their persistence layer produced: SQLite rows
//! with `0`/`1` booleans, `content` columns stored as JSON text, numeric ids.
//! A single odd record never aborts the load; only a payload whose overall
//! shape is wrong is rejected.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use contact_core::{CommunicationRecord, ContactError, ContactSnapshot, RecordPayload, TodoItem};

const RECORD_LIST_KEYS: [&str; 3] = ["communicationLogs", "communication_logs", "records"];
const TODO_LIST_KEYS: [&str; 1] = ["todos"];

/// Load a snapshot from a JSON string.
pub fn load_contact_str(json: &str) -> Result<ContactSnapshot, ContactError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| ContactError::Parse(err.to_string()))?;
    load_contact_value(&value)
}

/// Load a snapshot from a `serde_json::Value`.
pub fn load_contact_value(payload: &Value) -> Result<ContactSnapshot, ContactError> {
    if payload.is_null() {
        return Err(ContactError::MissingData);
    }

    let object = payload.as_object().ok_or_else(|| {
        ContactError::Parse(format!(
            "Expected a JSON object, received {}",
            value_kind(payload)
        ))
    })?;

    let records = list_field(object, &RECORD_LIST_KEYS)?
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| parse_record(index, raw))
        .collect();

    let todos = list_field(object, &TODO_LIST_KEYS)?
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| parse_todo(index, raw))
        .collect();

    Ok(ContactSnapshot::new(records, todos))
}

fn list_field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Result<&'a [Value], ContactError> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| object.get(*key).map(|value| (*key, value)))
    else {
        return Ok(&[]);
    };

    match value {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items),
        other => Err(ContactError::Parse(format!(
            "Field `{key}` must be an array, received {}",
            value_kind(other)
        ))),
    }
}

/// Parse one communication log. Only a non-object entry is dropped.
pub fn parse_record(index: usize, raw: &Value) -> Option<CommunicationRecord> {
    let Some(object) = raw.as_object() else {
        tracing::warn!(index, "skipping communication entry that is not an object");
        return None;
    };

    let id = extract_id(object.get("id")).unwrap_or_else(|| format!("record-{index}"));
    let occurred_at = first_field(object, &["timestamp", "occurred_at", "occurredAt", "created_at"])
        .and_then(parse_instant);
    let raw_kind = first_field(object, &["type", "kind"])
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let content = first_field(object, &["content", "payload"]).map(unwrap_json_text);

    let payload = build_payload(&raw_kind, content.as_ref());
    if let RecordPayload::Unrecognized { .. } = payload {
        tracing::warn!(%id, kind = %raw_kind, "unrecognized communication kind, rendering as note");
    }

    Some(CommunicationRecord::new(id, occurred_at, payload))
}

fn build_payload(raw_kind: &str, content: Option<&Value>) -> RecordPayload {
    let text_field = |names: &[&str]| -> Option<String> {
        match content? {
            Value::String(text) => Some(text.clone()),
            Value::Object(fields) => names
                .iter()
                .find_map(|name| fields.get(*name).and_then(scalar_text)),
            _ => None,
        }
    };
    let object_field = |names: &[&str]| -> Option<String> {
        let fields = content?.as_object()?;
        names
            .iter()
            .find_map(|name| fields.get(*name).and_then(scalar_text))
    };

    match raw_kind {
        "email" => RecordPayload::Email {
            subject: object_field(&["subject"]),
            body: object_field(&["body"]),
        },
        "text" => RecordPayload::Text {
            message: text_field(&["message", "text"]),
        },
        "call" => RecordPayload::Call {
            duration_minutes: content
                .and_then(Value::as_object)
                .and_then(|fields| {
                    first_field(fields, &["duration", "durationMinutes", "duration_minutes"])
                })
                .and_then(parse_minutes),
            notes: object_field(&["notes"]),
        },
        "note" => RecordPayload::Note {
            text: text_field(&["text", "note"]),
        },
        other => RecordPayload::Unrecognized {
            raw_kind: other.to_string(),
            text: text_field(&["text", "message", "body", "notes"]),
        },
    }
}

/// Parse one todo row. Rows without an id or text cannot be shown or toggled.
pub fn parse_todo(index: usize, raw: &Value) -> Option<TodoItem> {
    let Some(object) = raw.as_object() else {
        tracing::warn!(index, "skipping todo entry that is not an object");
        return None;
    };

    let Some(id) = extract_id(object.get("id")) else {
        tracing::warn!(index, "skipping todo without id");
        return None;
    };

    let text = object
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty());
    let Some(text) = text else {
        tracing::warn!(index, %id, "skipping todo without text");
        return None;
    };

    let is_complete = first_field(object, &["is_complete", "isComplete"])
        .map(truthy)
        .unwrap_or(false);
    let due_date = first_field(object, &["due_date", "dueDate"]).and_then(parse_date);

    Some(TodoItem {
        id,
        text: text.to_string(),
        is_complete,
        due_date,
    })
}

fn first_field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| object.get(*name))
        .filter(|value| !value.is_null())
}

fn extract_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Content columns are sometimes stored as serialized JSON text.
fn unwrap_json_text(value: &Value) -> Value {
    if let Value::String(text) = value {
        if text.trim_start().starts_with('{') {
            if let Ok(parsed @ Value::Object(_)) = serde_json::from_str::<Value>(text) {
                return parsed;
            }
        }
    }
    value.clone()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn parse_minutes(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|minutes| minutes.is_finite())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    }
}

fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_datetime(text.trim()),
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    // SQLite CURRENT_TIMESTAMP, always UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(text).map(|dt| dt.date_naive()))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
