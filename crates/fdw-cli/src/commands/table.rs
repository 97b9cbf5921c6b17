//! Foreign table options shared by every command

use clap::Args;
use fdw_query::{DataRow, ForeignDataSource, Qual, TableOptions, WrapperRegistry};
use serde_json::Value;
use std::sync::Arc;

/// Operator tokens, longest first so `<=` is not read as `<`
const OPERATORS: &[&str] = &["<=", ">=", "<>", "!=", "=", "<", ">"];

#[derive(Args, Clone)]
pub struct TableArgs {
    /// Wrapper to load: contentful_management or contentful (read-only)
    #[arg(long, default_value = "contentful_management")]
    pub wrapper: String,

    /// Contentful space identifier
    #[arg(long, env = "CONTENTFUL_SPACE")]
    pub space: String,

    /// Access token
    #[arg(long, env = "CONTENTFUL_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Entity kind: ContentType, Entry or Asset
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Content type the table is scoped to (required for entries)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Extra table options as key=value (api_url, page_size, timeout_secs)
    #[arg(long = "option", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,
}

impl TableArgs {
    pub fn table_options(&self) -> TableOptions {
        let mut options = TableOptions::new(&self.wrapper)
            .with_option("space", &self.space)
            .with_option("api_key", &self.api_key);

        if let Some(kind) = &self.kind {
            options = options.with_option("type", kind);
        }
        if let Some(content_type) = &self.content_type {
            options = options.with_option("content_type", content_type);
        }
        for (key, value) in &self.options {
            options = options.with_option(key, value);
        }

        options
    }

    /// Build the data source through the wrapper registry
    pub async fn open(&self) -> anyhow::Result<Arc<dyn ForeignDataSource>> {
        let registry = WrapperRegistry::new();
        fdw_query_contentful::register(&registry).await?;

        Ok(registry.create_source(self.table_options()).await?)
    }
}

/// Parse `key=value`
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

/// Parse a filter such as `title=Foo` or `file_size>=1024`
pub fn parse_qual(raw: &str) -> Result<Qual, String> {
    let (position, operator) = OPERATORS
        .iter()
        .filter_map(|op| raw.find(op).map(|pos| (pos, *op)))
        .min_by_key(|(pos, op)| (*pos, std::cmp::Reverse(op.len())))
        .ok_or_else(|| format!("no comparison operator in '{}'", raw))?;

    let field = raw[..position].trim();
    if field.is_empty() {
        return Err(format!("missing column name in '{}'", raw));
    }

    let value = raw[position + operator.len()..].trim();
    Ok(Qual::new(field, operator, parse_value(value)))
}

/// Column values are read as JSON when possible, otherwise as text
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Collect `--set` pairs into a row
pub fn row_from_pairs(pairs: &[(String, String)]) -> DataRow {
    pairs
        .iter()
        .map(|(key, value)| (key.clone(), parse_value(value)))
        .collect()
}
