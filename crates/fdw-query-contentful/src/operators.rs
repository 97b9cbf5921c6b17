//! Relational operator translation
//!
//! Contentful filters are written as `field.path[op]=value`; equality uses the
//! bare field path.

use fdw_query::{DataError, Result};
use std::fmt;
use std::str::FromStr;

/// Comparison operators the remote query syntax can express
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Operator {
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    Ne,
}

impl Operator {
    /// Suffix appended to the field path in a remote query key
    pub fn suffix(&self) -> &'static str {
        match self {
            Operator::Lt => "[lt]",
            Operator::Gt => "[gt]",
            Operator::Lte => "[lte]",
            Operator::Gte => "[gte]",
            Operator::Eq => "",
            Operator::Ne => "[ne]",
        }
    }
}

impl FromStr for Operator {
    type Err = DataError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Lte),
            ">=" => Ok(Operator::Gte),
            "=" => Ok(Operator::Eq),
            "<>" | "!=" => Ok(Operator::Ne),
            other => Err(DataError::unknown_operator(other)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::Eq => "=",
            Operator::Ne => "<>",
        };
        write!(f, "{}", token)
    }
}

/// Translate a relational operator token into its remote query suffix
pub fn translate(token: &str) -> Result<&'static str> {
    token.parse::<Operator>().map(|op| op.suffix())
}
