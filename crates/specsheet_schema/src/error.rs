//! Error types for the schema module.

use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while resolving schemas or checking document shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Malformed document in tab '{tab}': {reason}")]
    MalformedDocument { tab: String, reason: String },
}

impl SchemaError {
    pub(crate) fn malformed(tab: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            tab: tab.into(),
            reason: reason.into(),
        }
    }
}
