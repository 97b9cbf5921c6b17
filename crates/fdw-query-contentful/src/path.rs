//! Dotted-path access into Contentful documents

use serde_json::{Map, Value};

/// Columns that address server-managed `sys` attributes in queries
const QUERY_SYS_FIELDS: &[(&str, &str)] = &[("id", "sys.id"), ("type", "sys.type")];

/// Map a column name to the path used in a remote query key
///
/// Content fields are queried under `fields.`, system columns under `sys.`.
pub fn resolve_query_field(column: &str) -> String {
    QUERY_SYS_FIELDS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, path)| path.to_string())
        .unwrap_or_else(|| format!("fields.{}", column))
}

/// Walk `path` through nested objects
///
/// Returns `None` when any segment is missing or an intermediate value is
/// not an object.
pub fn get_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.as_object()?.get(segment))
}

/// Assign `value` at `path`, creating intermediate objects as needed
///
/// A non-object intermediate is replaced by an empty object.
pub fn set_path(document: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = match segments.pop() {
        Some(last) => last,
        None => return,
    };

    let mut current = document;
    for segment in segments {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just made an object"),
        };
    }

    current.insert(last.to_string(), value);
}
