//! Translation of pushed-down quals into Contentful query parameters

use crate::kind::EntityKind;
use crate::operators::translate;
use crate::path::resolve_query_field;
use fdw_query::{DataError, Qual, Result};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Combined remote query: `field.path[op]` keys mapped to filter values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteQuery {
    params: Map<String, Value>,
}

impl RemoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Set a parameter, replacing any earlier value for the same key
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.params.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render as URL query pairs
    ///
    /// Strings are sent bare, arrays as comma-separated lists and every
    /// other value in its JSON text form.
    pub fn to_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| (key.clone(), param_value(value)))
            .collect()
    }
}

impl fmt::Display for RemoteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.params.clone()))
    }
}

fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(param_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Build the remote query for a scan
///
/// Any unsupported operator fails the whole plan; dropping a qual would
/// widen the result set. Entry scans are always pinned to `content_type`.
pub fn plan_query(kind: EntityKind, content_type: Option<&str>, quals: &[Qual]) -> Result<RemoteQuery> {
    let mut query = RemoteQuery::new();

    for qual in quals {
        let suffix = translate(&qual.operator)?;
        let key = format!("{}{}", resolve_query_field(&qual.field_name), suffix);
        query.set(key, qual.value.clone());
    }

    if kind == EntityKind::Entry {
        let content_type = content_type
            .filter(|ct| !ct.is_empty())
            .ok_or_else(|| DataError::missing_configuration("content_type"))?;
        query.set("content_type", Value::String(content_type.to_string()));
    }

    debug!("Translated query: {}", query);

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equality_uses_bare_path() {
        let query = plan_query(EntityKind::Asset, None, &[Qual::new("title", "=", "Foo")]).unwrap();

        assert_eq!(query.len(), 1);
        assert_eq!(query.get("fields.title"), Some(&json!("Foo")));
    }

    #[test]
    fn test_system_fields_and_suffixes() {
        let quals = vec![
            Qual::new("id", "<>", "abc"),
            Qual::new("type", "=", "Asset"),
            Qual::new("file_size", ">=", 1024),
            Qual::new("rating", "<", 3),
        ];
        let query = plan_query(EntityKind::Asset, None, &quals).unwrap();

        assert_eq!(query.get("sys.id[ne]"), Some(&json!("abc")));
        assert_eq!(query.get("sys.type"), Some(&json!("Asset")));
        assert_eq!(query.get("fields.file_size[gte]"), Some(&json!(1024)));
        assert_eq!(query.get("fields.rating[lt]"), Some(&json!(3)));
    }

    #[test]
    fn test_entry_query_is_pinned_to_content_type() {
        let query = plan_query(EntityKind::Entry, Some("blog"), &[]).unwrap();
        assert_eq!(query.get("content_type"), Some(&json!("blog")));

        // A qual on the same key cannot widen the scan
        let quals = vec![Qual::new("title", "=", "Hello")];
        let query = plan_query(EntityKind::Entry, Some("blog"), &quals).unwrap();
        assert_eq!(query.get("content_type"), Some(&json!("blog")));
        assert_eq!(query.get("fields.title"), Some(&json!("Hello")));
    }

    #[test]
    fn test_entry_query_without_content_type_fails() {
        let quals = vec![Qual::new("title", "=", "Hello")];

        for content_type in [None, Some("")] {
            match plan_query(EntityKind::Entry, content_type, &quals) {
                Err(DataError::MissingConfiguration(option)) => assert_eq!(option, "content_type"),
                other => panic!("expected MissingConfiguration, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_non_entry_query_has_no_content_type() {
        let query = plan_query(EntityKind::ContentType, Some("blog"), &[]).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_unknown_operator_aborts_plan() {
        let quals = vec![
            Qual::new("title", "=", "Hello"),
            Qual::new("body", "~~", "%foo%"),
        ];

        match plan_query(EntityKind::Entry, Some("blog"), &quals) {
            Err(DataError::UnknownOperator(op)) => assert_eq!(op, "~~"),
            other => panic!("expected UnknownOperator, got {:?}", other),
        }
    }

    #[test]
    fn test_to_params_renders_values() {
        let quals = vec![
            Qual::new("title", "=", "Foo"),
            Qual::new("rating", ">", 2),
            Qual::new("draft", "=", false),
        ];
        let params = plan_query(EntityKind::Entry, Some("blog"), &quals)
            .unwrap()
            .to_params();

        assert_eq!(
            params,
            vec![
                ("fields.title".to_string(), "Foo".to_string()),
                ("fields.rating[gt]".to_string(), "2".to_string()),
                ("fields.draft".to_string(), "false".to_string()),
                ("content_type".to_string(), "blog".to_string()),
            ]
        );
    }
}
