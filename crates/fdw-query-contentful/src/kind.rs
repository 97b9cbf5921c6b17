use fdw_query::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remote resource shape a foreign table is bound to
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    ContentType,
    Entry,
    Asset,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ContentType => "ContentType",
            EntityKind::Entry => "Entry",
            EntityKind::Asset => "Asset",
        }
    }

    /// Path segment of the remote collection holding this kind
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::ContentType => "content_types",
            EntityKind::Entry => "entries",
            EntityKind::Asset => "assets",
        }
    }
}

impl FromStr for EntityKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ContentType" => Ok(EntityKind::ContentType),
            "Entry" => Ok(EntityKind::Entry),
            "Asset" => Ok(EntityKind::Asset),
            other => Err(DataError::UnsupportedEntityKind(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
