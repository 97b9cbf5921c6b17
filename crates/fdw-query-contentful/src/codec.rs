//! Conversion between Contentful documents and flat rows
//!
//! Each entity kind owns a static column → path table. Decoding reads every
//! path with [`get_path`] so partially populated documents produce nulls;
//! encoding writes the writable subset back with [`set_path`].

use crate::kind::EntityKind;
use crate::path::{get_path, set_path};
use fdw_query::{DataError, DataRow, Result};
use serde_json::{Map, Value};

/// Locale every entry field is read from and written to
pub const LOCALE: &str = "en-US";

/// Server-managed columns shared by every kind
const SYS_MAP: &[(&str, &str)] = &[
    ("id", "sys.id"),
    ("type", "sys.type"),
    ("version", "sys.version"),
    ("published_version", "sys.publishedVersion"),
];

const CONTENT_TYPE_MAP: &[(&str, &str)] = &[("name", "name"), ("description", "description")];

/// Raw field-schema array of a content type, exposed as JSON text
const CONTENT_TYPE_SCHEMA_COLUMN: &str = "fields";

const ENTRY_MAP: &[(&str, &str)] = &[("content_type", "sys.contentType.sys.id")];

const ASSET_MAP: &[(&str, &str)] = &[
    ("title", "title"),
    ("description", "description"),
    ("file_name", "file.fileName"),
    ("file_content_type", "file.contentType"),
    ("file_url", "file.url"),
    ("file_size", "file.details.size"),
];

/// Entry columns that never become locale-wrapped fields
const ENTRY_RESERVED_COLUMNS: &[&str] =
    &["id", "type", "version", "published_version", "content_type"];

/// Convert a remote document into a row for `kind`
pub fn decode(kind: EntityKind, document: &Value) -> Result<DataRow> {
    let mut row = DataRow::new();
    read_map(&mut row, document, SYS_MAP);

    match kind {
        EntityKind::ContentType => {
            read_map(&mut row, document, CONTENT_TYPE_MAP);
            let schema = match document.get(CONTENT_TYPE_SCHEMA_COLUMN) {
                Some(fields) => Value::String(serde_json::to_string(fields)?),
                None => Value::Null,
            };
            row.insert(CONTENT_TYPE_SCHEMA_COLUMN.to_string(), schema);
        }
        EntityKind::Entry => {
            read_map(&mut row, document, ENTRY_MAP);
            if let Some(fields) = document.get("fields").and_then(Value::as_object) {
                for (column, localized) in fields {
                    if ENTRY_RESERVED_COLUMNS.contains(&column.as_str()) {
                        continue;
                    }
                    let value = localized.get(LOCALE).map(link_to_id).unwrap_or(Value::Null);
                    row.insert(column.clone(), value);
                }
            }
        }
        EntityKind::Asset => read_map(&mut row, document, ASSET_MAP),
    }

    Ok(row)
}

/// Convert a row into the request payload for `kind`
///
/// Only writable columns are written; `id` and other system columns are
/// addressed through the request path and headers instead.
pub fn encode(kind: EntityKind, row: &DataRow) -> Result<Value> {
    let mut payload = Map::new();

    match kind {
        EntityKind::ContentType => {
            write_map(&mut payload, row, CONTENT_TYPE_MAP);
            if let Some(schema) = row.get(CONTENT_TYPE_SCHEMA_COLUMN) {
                let schema = match schema {
                    Value::String(text) => serde_json::from_str(text)?,
                    Value::Null => Value::Null,
                    structured => structured.clone(),
                };
                if !schema.is_null() {
                    payload.insert(CONTENT_TYPE_SCHEMA_COLUMN.to_string(), schema);
                }
            }
        }
        EntityKind::Entry => {
            for (column, value) in row {
                if ENTRY_RESERVED_COLUMNS.contains(&column.as_str()) {
                    continue;
                }
                let path = format!("fields.{}.{}", column, LOCALE);
                set_path(&mut payload, &path, value.clone());
            }
        }
        EntityKind::Asset => write_map(&mut payload, row, ASSET_MAP),
    }

    Ok(Value::Object(payload))
}

/// Read the optimistic-concurrency version out of a row value
pub fn parse_version(value: &Value) -> Result<i64> {
    let version = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    version.ok_or_else(|| DataError::InvalidQuery(format!("version must be an integer, got {}", value)))
}

fn read_map(row: &mut DataRow, document: &Value, map: &[(&str, &str)]) {
    for (column, path) in map {
        let value = get_path(document, path).cloned().unwrap_or(Value::Null);
        row.insert(column.to_string(), value);
    }
}

fn write_map(payload: &mut Map<String, Value>, row: &DataRow, map: &[(&str, &str)]) {
    for (column, path) in map {
        if let Some(value) = row.get(*column) {
            set_path(payload, path, value.clone());
        }
    }
}

/// Replace links to other entries/assets with the linked id
fn link_to_id(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(link_to_id).collect()),
        Value::Object(_) if get_path(value, "sys.type").and_then(Value::as_str) == Some("Link") => {
            get_path(value, "sys.id").cloned().unwrap_or(Value::Null)
        }
        other => other.clone(),
    }
}
