//! Error handling for the campus events backend
//!
//! This module defines the main error type used throughout the application
//! and the classification helpers the HTTP layer relies on.

use thiserror::Error;
use uuid::Uuid;

/// PostgreSQL SQLSTATE for `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Main error type for the application
#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Data integrity fault: {0}")]
    Integrity(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for campus operations
pub type Result<T> = std::result::Result<T, CampusError>;

impl From<sqlx::Error> for CampusError {
    fn from(err: sqlx::Error) -> Self {
        // FK and unique violations are reported as conflicts with the stored data
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) | Some(UNIQUE_VIOLATION) => {
                    return CampusError::Conflict(db_err.message().to_string());
                }
                _ => {}
            }
        }
        CampusError::Database(err)
    }
}

impl From<config::ConfigError> for CampusError {
    fn from(err: config::ConfigError) -> Self {
        CampusError::Config(err.to_string())
    }
}

impl CampusError {
    /// Whether the caller caused the error (bad input, missing row, conflicting data)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CampusError::InvalidInput(_) | CampusError::NotFound { .. } | CampusError::Conflict(_)
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CampusError::Database(_) => ErrorSeverity::Critical,
            CampusError::Migration(_) => ErrorSeverity::Critical,
            CampusError::Config(_) => ErrorSeverity::Critical,
            CampusError::Integrity(_) => ErrorSeverity::Critical,
            CampusError::Conflict(_) => ErrorSeverity::Warning,
            CampusError::InvalidInput(_) => ErrorSeverity::Info,
            CampusError::NotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
