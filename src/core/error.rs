//! Error types for tomb_atlas
//!
//! This module provides structured error handling using thiserror.
//! Hard failures (I/O, malformed artifact lists, bad configuration) surface
//! as [`AtlasError`]; per-field decode problems surface as
//! [`FieldDecodeError`] and are normally absorbed by a documented fallback.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Errors that can occur while loading or configuring the atlas
#[derive(Error, Debug)]
pub enum AtlasError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The artifact list document has the wrong top-level shape
    #[error("Invalid artifact list: {message}")]
    InvalidArtifactList { message: String },

    /// A single field could not be decoded
    #[error("Field decode error: {0}")]
    FieldDecode(#[from] FieldDecodeError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AtlasError>,
    },
}

impl AtlasError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AtlasError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AtlasError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid artifact list error
    pub fn invalid_artifact_list(message: impl Into<String>) -> Self {
        AtlasError::InvalidArtifactList {
            message: message.into(),
        }
    }
}

/// Structured failure from one of the per-field decoders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldDecodeError {
    /// None of the field's aliases were present
    #[error("field '{field}' is missing")]
    Missing { field: String },

    /// The value has a JSON shape the decoder does not accept
    #[error("field '{field}' has unsupported shape: {found}")]
    WrongShape { field: String, found: String },

    /// A component that should be numeric is not
    #[error("field '{field}' is not a number: {raw}")]
    NotANumber { field: String, raw: String },

    /// Too few numeric components to build a position
    #[error("field '{field}' has {found} numeric components, expected 3")]
    TooFewComponents { field: String, found: usize },

    /// Date text matched none of the accepted formats
    #[error("field '{field}' is not a recognizable date: {raw}")]
    UnparseableDate { field: String, raw: String },
}

impl FieldDecodeError {
    pub(crate) fn missing(field: &str) -> Self {
        FieldDecodeError::Missing {
            field: field.to_string(),
        }
    }

    pub(crate) fn wrong_shape(field: &str, value: &serde_json::Value) -> Self {
        FieldDecodeError::WrongShape {
            field: field.to_string(),
            found: json_kind(value).to_string(),
        }
    }
}

/// Short name of a JSON value's kind, for diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
