//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(e: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(e.to_string())
    }
}

/// Failure while looking up a record that backs a permission decision.
///
/// Never escapes sidebar resolution: callers turn it into a deny.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Lookup of {kind} '{name}' failed: {reason}")]
    Store {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("Inconsistent permission data: {0}")]
    Inconsistent(String),
}
