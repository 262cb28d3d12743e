//! Structured error types for bundle loading.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ResourceNotFound,
    ReadFailure,
    SchemaMismatch,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::ReadFailure => "READ_FAILURE",
            ErrorCode::SchemaMismatch => "SCHEMA_MISMATCH",
        }
    }
}

/// Why a bundled resource could not be turned into a value.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("resource not found: {name}.{extension}")]
    ResourceNotFound { name: String, extension: String },

    #[error("failed to read resource {name} from {location}: {source}")]
    ReadFailure {
        name: String,
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("resource {name} does not match the expected schema: {source}")]
    SchemaMismatch {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BundleError {
    pub fn not_found(name: &str, extension: &str) -> Self {
        BundleError::ResourceNotFound {
            name: name.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BundleError::ResourceNotFound { .. } => ErrorCode::ResourceNotFound,
            BundleError::ReadFailure { .. } => ErrorCode::ReadFailure,
            BundleError::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
        }
    }

    /// Name of the resource the error refers to.
    pub fn resource_name(&self) -> &str {
        match self {
            BundleError::ResourceNotFound { name, .. }
            | BundleError::ReadFailure { name, .. }
            | BundleError::SchemaMismatch { name, .. } => name,
        }
    }
}

/// Result type for bundle operations.
pub type BundleResult<T> = std::result::Result<T, BundleError>;
