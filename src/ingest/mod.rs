//! Repository record ingest
//!
//! Accepts either a bare JSON array of records or an exported data document
//! (`{"repositories": [...]}`). Each record may use the platform API field
//! names or the exported camelCase names. Missing optional fields become
//! empty values, as do fields of the wrong type; a slot that is not an
//! object at all, or a record without a name, fails fast.

use crate::domain::{ApiRepository, RepositoryRecord, UNKNOWN_LANGUAGE};
use crate::error::{ClassifyError, Result};
use anyhow::Context;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Keys that only appear in the platform API's record shape.
const API_MARKER_KEYS: &[&str] = &["full_name", "html_url", "stargazers_count", "forks_count"];

/// Expected JSON type of an optional record field.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Count,
    Topics,
    Owner,
}

const API_FIELDS: &[(&str, FieldKind)] = &[
    ("id", FieldKind::Count),
    ("owner", FieldKind::Owner),
    ("full_name", FieldKind::Text),
    ("description", FieldKind::Text),
    ("html_url", FieldKind::Text),
    ("language", FieldKind::Text),
    ("stargazers_count", FieldKind::Count),
    ("forks_count", FieldKind::Count),
    ("updated_at", FieldKind::Text),
    ("topics", FieldKind::Topics),
];

const EXPORT_FIELDS: &[(&str, FieldKind)] = &[
    ("id", FieldKind::Count),
    ("owner", FieldKind::Text),
    ("fullName", FieldKind::Text),
    ("description", FieldKind::Text),
    ("url", FieldKind::Text),
    ("language", FieldKind::Text),
    ("stars", FieldKind::Count),
    ("forks", FieldKind::Count),
    ("updatedAt", FieldKind::Text),
    ("topics", FieldKind::Topics),
];

pub fn load_records(path: &Path) -> anyhow::Result<Vec<RepositoryRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading input file: {}", path.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("Invalid repository input: {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded repository records");
    Ok(records)
}

pub fn parse_records(content: &str) -> Result<Vec<RepositoryRecord>> {
    let root: Value = serde_json::from_str(content)?;
    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("repositories") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ClassifyError::InvalidInput(
                    "expected an array or an object with a 'repositories' array".into(),
                ))
            }
        },
        _ => {
            return Err(ClassifyError::InvalidInput(
                "expected an array or an object with a 'repositories' array".into(),
            ))
        }
    };

    items.into_iter().enumerate().map(|(index, item)| parse_record(index, item)).collect()
}

fn parse_record(index: usize, item: Value) -> Result<RepositoryRecord> {
    let mut obj = match item {
        Value::Object(obj) => obj,
        other => {
            return Err(ClassifyError::InvalidRecord {
                index,
                reason: format!("expected an object, found {}", value_kind(&other)),
            })
        }
    };

    match obj.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        _ => {
            return Err(ClassifyError::InvalidRecord {
                index,
                reason: "missing or empty 'name'".into(),
            })
        }
    }

    let api_shape = is_api_shape(&obj);
    drop_malformed_fields(index, &mut obj, if api_shape { API_FIELDS } else { EXPORT_FIELDS });

    let mut record = if api_shape {
        let api: ApiRepository = serde_json::from_value(Value::Object(obj))
            .map_err(|e| ClassifyError::InvalidRecord { index, reason: e.to_string() })?;
        RepositoryRecord::from(api)
    } else {
        serde_json::from_value(Value::Object(obj))
            .map_err(|e| ClassifyError::InvalidRecord { index, reason: e.to_string() })?
    };

    record.description = Some(sanitize_description(record.description.as_deref().unwrap_or("")));
    if record.language.as_deref().map_or(true, |lang| lang.trim().is_empty()) {
        record.language = Some(UNKNOWN_LANGUAGE.to_string());
    }
    Ok(record)
}

/// Remove optional fields holding the wrong JSON type so they fall back to
/// their empty value. Non-string topic entries are dropped individually.
fn drop_malformed_fields(index: usize, obj: &mut Map<String, Value>, fields: &[(&str, FieldKind)]) {
    for &(key, kind) in fields {
        let Some(value) = obj.get_mut(key) else {
            continue;
        };
        let valid = match (kind, &mut *value) {
            (_, Value::Null) => true,
            (FieldKind::Text, Value::String(_)) => true,
            (FieldKind::Count, Value::Number(n)) => n.as_u64().is_some(),
            (FieldKind::Owner, Value::Object(owner)) => {
                matches!(owner.get("login"), None | Some(Value::String(_)))
            }
            (FieldKind::Topics, Value::Array(topics)) => {
                let before = topics.len();
                topics.retain(Value::is_string);
                if topics.len() != before {
                    tracing::warn!(index, dropped = before - topics.len(), "ignoring non-string topics");
                }
                true
            }
            _ => false,
        };
        if !valid {
            tracing::warn!(
                index,
                field = key,
                found = value_kind(value),
                "ignoring malformed field"
            );
            obj.remove(key);
        }
    }
}

fn is_api_shape(obj: &Map<String, Value>) -> bool {
    API_MARKER_KEYS.iter().any(|key| obj.contains_key(*key))
}

/// Replace characters that break downstream JSON/HTML embedding with spaces.
pub fn sanitize_description(description: &str) -> String {
    description.replace(['\\', '"', '\n', '\r'], " ").trim().to_string()
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
