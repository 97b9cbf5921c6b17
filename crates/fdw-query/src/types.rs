use crate::error::Result;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capabilities supported by a foreign data source
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Capability {
    /// SELECT via predicate scans
    Scan,
    /// INSERT of new rows
    Insert,
    /// UPDATE of rows addressed by the rowid column
    Update,
    /// DELETE of rows addressed by the rowid column
    Delete,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Scan => write!(f, "scan"),
            Capability::Insert => write!(f, "insert"),
            Capability::Update => write!(f, "update"),
            Capability::Delete => write!(f, "delete"),
        }
    }
}

/// A single restriction pushed down by the host: `field_name operator value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qual {
    /// Column the restriction applies to
    pub field_name: String,
    /// Relational operator token as written by the host (`=`, `<>`, `>=`, ...)
    pub operator: String,
    /// Right-hand side value
    pub value: serde_json::Value,
}

impl Qual {
    pub fn new(
        field_name: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Qual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field_name, self.operator, self.value)
    }
}

/// A row of data as column-name/value pairs, kept in column order
pub type DataRow = serde_json::Map<String, serde_json::Value>;

/// Lazy, forward-only sequence of rows produced by a scan
pub type RowStream<'a> = BoxStream<'a, Result<DataRow>>;
