//! Validated construction of entities from loosely-typed JSON field maps.
//!
//! Each `from_record` either returns a fully populated entity or a
//! [`CoreError::Validation`] naming the offending field; partially populated
//! records are never produced.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::models::{timestamp_format, Expertise, Immigrant, Mentor, ProgressEntry, Resource};

/// A raw JSON object as read by the persistence layer.
pub type Record = Map<String, Value>;

/// Borrow `value` as a JSON object or fail with a validation error.
pub fn as_record<'a>(field: &str, value: &'a Value) -> Result<&'a Record> {
    value
        .as_object()
        .ok_or_else(|| CoreError::validation(field, format!("expected an object, found {}", kind(value))))
}

impl Immigrant {
    /// Build an immigrant from a field map.
    ///
    /// Required: `name`, `email`, `native_language`, `desired_language`,
    /// `location`, `goals`. Optional: `progress_log`.
    pub fn from_record(record: &Record) -> Result<Self> {
        let goals = string_list(record, "goals")?;
        let log = match record.get("progress_log") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| progress_entry(&format!("progress_log[{}]", i), item))
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(CoreError::validation(
                    "progress_log",
                    format!("expected a list, found {}", kind(other)),
                ))
            }
        };

        Ok(Immigrant::new(
            required_str(record, "name")?,
            required_str(record, "email")?,
            required_str(record, "native_language")?,
            required_str(record, "desired_language")?,
            required_str(record, "location")?,
            goals,
        )?
        .with_progress_log(log))
    }
}

impl Mentor {
    /// Build a mentor from a field map.
    ///
    /// Required: `name`, `email`, `expertise` (a string or a list of strings),
    /// `available_languages`. Optional: `availability` (defaults to `true`).
    pub fn from_record(record: &Record) -> Result<Self> {
        let expertise: BTreeSet<Expertise> = match record.get("expertise") {
            Some(Value::String(s)) => BTreeSet::from([s.parse()?]),
            Some(Value::Array(_)) => string_list(record, "expertise")?
                .iter()
                .map(|s| s.parse())
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(CoreError::validation(
                    "expertise",
                    format!("expected a string or list, found {}", kind(other)),
                ))
            }
            None => return Err(missing("expertise")),
        };

        let available = match record.get("availability") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(CoreError::validation(
                    "availability",
                    format!("expected a boolean, found {}", kind(other)),
                ))
            }
        };

        Mentor::with_expertise(
            required_str(record, "name")?,
            required_str(record, "email")?,
            expertise,
            &string_list(record, "available_languages")?,
            available,
        )
    }
}

impl Resource {
    /// Build a resource from a field map with `location`, `category` and
    /// `title` (`name` is accepted in place of `title`).
    pub fn from_record(record: &Record) -> Result<Self> {
        let title = match record.get("title") {
            Some(_) => required_str(record, "title")?,
            None => required_str(record, "name").map_err(|_| missing("title"))?,
        };
        Resource::new(
            required_str(record, "location")?,
            required_str(record, "category")?,
            title,
        )
    }
}

// ── Field helpers ─────────────────────────────────────────────────────────────

fn progress_entry(field: &str, value: &Value) -> Result<ProgressEntry> {
    let record = as_record(field, value)?;
    let raw_ts = required_str(record, "timestamp")
        .map_err(|_| missing(&format!("{}.timestamp", field)))?;
    let timestamp = timestamp_format::parse(raw_ts).ok_or_else(|| {
        CoreError::validation(
            format!("{}.timestamp", field),
            format!("'{}' is not a valid timestamp", raw_ts),
        )
    })?;
    let session_type = required_str(record, "session_type")
        .map_err(|_| missing(&format!("{}.session_type", field)))?;
    let details = match record.get("details") {
        Some(Value::String(s)) => s.as_str(),
        _ => "",
    };
    Ok(ProgressEntry::new(session_type, details, timestamp))
}

fn required_str<'a>(record: &'a Record, field: &str) -> Result<&'a str> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(CoreError::validation(
            field,
            format!("expected a string, found {}", kind(other)),
        )),
        None => Err(missing(field)),
    }
}

/// A list of strings; a single comma-separated string is also accepted.
fn string_list(record: &Record, field: &str) -> Result<Vec<String>> {
    match record.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(CoreError::validation(
                    field,
                    format!("expected a list of strings, found {}", kind(other)),
                )),
            })
            .collect(),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()),
        Some(other) => Err(CoreError::validation(
            field,
            format!("expected a list, found {}", kind(other)),
        )),
        None => Err(missing(field)),
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::validation(field, "missing required field")
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
