//! Error types for td
//!
//! Every error is terminal for the current invocation: the CLI prints it and
//! exits with code 1.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the td CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Main error type for td operations
#[derive(Error, Debug)]
pub enum Error {
    // Store access
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed data in {path}: {message}")]
    MalformedData { path: PathBuf, message: String },

    #[error("{0}: To-do file has been initialized before")]
    AlreadyInitialized(PathBuf),

    #[error("{0}: One or more directories in this path doesn't exist")]
    MissingParentDirectory(PathBuf),

    // Collection operations
    #[error("The todo with the id {0} was not found.")]
    NotFound(i64),

    #[error("The ID {0} is already in the list")]
    DuplicateId(i64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // I/O and serialization
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }

    /// Stable machine-readable tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            Error::StoreUnavailable(_) => "store_unavailable",
            Error::MalformedData { .. } => "malformed_data",
            Error::AlreadyInitialized(_) => "already_initialized",
            Error::MissingParentDirectory(_) => "missing_parent_directory",
            Error::NotFound(_) => "not_found",
            Error::DuplicateId(_) => "duplicate_id",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::InvalidConfig(_) | Error::TomlParse(_) => "invalid_config",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
        }
    }

    /// Structured details attached to JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::NotFound(id) | Error::DuplicateId(id) => Some(serde_json::json!({ "id": id })),
            Error::MalformedData { path, .. }
            | Error::AlreadyInitialized(path)
            | Error::MissingParentDirectory(path) => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            _ => None,
        }
    }
}

/// Result type alias for td operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_exits_with_one() {
        let errors = [
            Error::StoreUnavailable("missing".to_string()),
            Error::NotFound(3),
            Error::DuplicateId(2),
            Error::AlreadyInitialized(PathBuf::from("/tmp/.todos")),
            Error::Io(std::io::Error::other("boom")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), exit_codes::FAILURE);
        }
    }

    #[test]
    fn not_found_message_names_id() {
        let err = Error::NotFound(42);
        assert_eq!(err.to_string(), "The todo with the id 42 was not found.");
        assert_eq!(err.details(), Some(serde_json::json!({ "id": 42 })));
    }
}
