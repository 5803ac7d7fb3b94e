//! Conversion between persisted JSON text and note collections.
//!
//! The persisted form is strict: a JSON array whose elements carry all five
//! note fields. Import files are untrusted and go through [`parse_import`],
//! which keeps every element that passes [`validate_note`] and drops the rest.

use crate::core::note::now_millis;
use crate::{Note, NotekeepError, Result};
use serde_json::Value;

/// Encodes a collection in the compact form written to the key-value store.
pub fn serialize(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Encodes a collection with indentation, for export files.
pub fn serialize_pretty(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

/// Decodes a persisted collection.
///
/// # Errors
///
/// Returns [`NotekeepError::Json`] if `text` is not well-formed JSON or an
/// element lacks a field, and [`NotekeepError::InvalidFormat`] if the top-level
/// value is not an array. No partial result is ever returned.
pub fn deserialize(text: &str) -> Result<Vec<Note>> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(NotekeepError::InvalidFormat(format!(
            "expected an array of notes, found {}",
            json_kind(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Accepts a candidate note from an untrusted source.
///
/// The candidate must be an object with string `id`, `title` and `content`.
/// A `createdAt` or `updatedAt` that is missing, zero, or not a number is
/// replaced by the current time instead of rejecting the record.
pub fn validate_note(value: &Value) -> Option<Note> {
    let obj = value.as_object()?;
    let id = obj.get("id")?.as_str()?;
    let title = obj.get("title")?.as_str()?;
    let content = obj.get("content")?.as_str()?;

    let now = now_millis();
    Some(Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: timestamp_or(obj.get("createdAt"), now),
        updated_at: timestamp_or(obj.get("updatedAt"), now),
    })
}

/// Parses the contents of an import file into the notes it validly contains.
///
/// # Errors
///
/// Returns [`NotekeepError::Json`] for malformed JSON and
/// [`NotekeepError::InvalidFormat`] if the top-level value is not an array.
/// Individual invalid elements are skipped, not reported.
pub fn parse_import(text: &str) -> Result<Vec<Note>> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(NotekeepError::InvalidFormat(format!(
                "expected an array of notes, found {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let notes: Vec<Note> = items.iter().filter_map(validate_note).collect();
    if notes.len() < total {
        log::debug!(
            "skipped {} of {} imported records without string id/title/content",
            total - notes.len(),
            total
        );
    }
    Ok(notes)
}

fn timestamp_or(value: Option<&Value>, fallback: i64) -> i64 {
    let ts = value.and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)));
    match ts {
        Some(ts) if ts != 0 => ts,
        _ => fallback,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
