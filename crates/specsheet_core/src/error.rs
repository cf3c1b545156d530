//! Error types for the core module.

use std::path::PathBuf;

use serde::Serialize;
use specsheet_schema::SchemaError;
use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that stop assembly of a workbook.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CoreError {
    /// Whether the error is a structural defect of the supplied document.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CoreError::Schema(SchemaError::MalformedDocument { .. }))
    }
}

/// Problems with a single record. These never stop assembly; the record is
/// kept with the offending field unset.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Prohibited field present: {field}")]
    ProhibitedPresent { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Parameter '{parameter}' is not preceded by an operation")]
    OrphanParameter { parameter: String },

    #[error("Parameter '{parameter}' names operation '{operation}', not the operation above it")]
    ParameterOperationMismatch { parameter: String, operation: String },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequired { field: field.into() }
    }

    pub fn prohibited(field: impl Into<String>) -> Self {
        Self::ProhibitedPresent { field: field.into() }
    }

    pub fn invalid(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
