use thiserror::Error;

/// Unified error type for all foreign data source operations
///
/// None of these are recovered inside a data source; every variant is
/// surfaced to the host as a statement failure.
#[derive(Error, Debug)]
pub enum DataError {
    /// A predicate used an operator the remote API cannot express
    #[error("'{0}' is not a supported operator.")]
    UnknownOperator(String),

    /// The remote API answered with a status outside 200/201/204
    #[error("Remote request failed ({status}): {body}")]
    InvalidRemoteResponse { status: u16, body: String },

    /// Configured entity kind is not one the backend knows
    #[error("Entities of type {0} are not supported")]
    UnsupportedEntityKind(String),

    /// A required table option was absent
    #[error("{0} parameter is required.")]
    MissingConfiguration(String),

    /// An update arrived without its optimistic-concurrency version
    #[error("Update request requires a version")]
    MissingConcurrencyToken,

    /// Update or delete was issued without a row identifier
    #[error("Request requires rowid ({0})")]
    MissingRowId(String),

    /// Invalid query or row values
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid configuration value (present but unusable)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level failure talking to the remote API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

impl DataError {
    /// Create an unknown operator error for the offending token
    pub fn unknown_operator(token: impl Into<String>) -> Self {
        DataError::UnknownOperator(token.into())
    }

    /// Create a missing configuration error naming the option
    pub fn missing_configuration(option: impl Into<String>) -> Self {
        DataError::MissingConfiguration(option.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        DataError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
