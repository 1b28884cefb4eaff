//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all layers of Roster.
///
/// Recoverable conditions (`DuplicateEmail`, `NotFound`, `PoolExhausted`) are
/// distinct variants so callers can branch on them; `Configuration` is fatal at
/// startup and `Storage` covers everything else the store reports.
#[derive(Error, Debug)]
pub enum RosterError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation on the email column
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    // ============ Infrastructure Errors ============
    /// Connection acquisition timed out
    #[error("Connection pool exhausted: {0}")]
    PoolExhausted(String),

    /// Store-level failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::PoolExhausted(_) => "POOL_EXHAUSTED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage<T: Into<String>>(message: T) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if the caller may retry the operation (with backoff).
    ///
    /// Only pool exhaustion qualifies; the repository itself never retries.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::PoolExhausted(_))
    }

    /// Checks if this error means the requested row does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this error should abort startup.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RosterError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::PoolTimedOut => {
                Self::PoolExhausted("timed out waiting for a pooled connection".to_string())
            }
            sqlx::Error::Configuration(e) => Self::Configuration(e.to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}
