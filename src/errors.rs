//! Unified application error type.
//! All modules (db, workflow, core, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use rusqlite::ErrorCode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(rusqlite::Error),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid value: {0}")]
    Validation(String),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    #[error("Action '{action}' is not allowed in state {state}")]
    InvalidTransition { state: String, action: String },

    #[error("Selection is stale: {0}")]
    StaleSelection(String),

    #[error("No workflow session named '{0}'")]
    SessionNotFound(String),

    #[error("Corrupted session state: {0}")]
    SessionState(#[from] serde_json::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => AppError::ConstraintViolation(err.to_string()),
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure
                | ErrorCode::ReadOnly
                | ErrorCode::NotADatabase
                | ErrorCode::PermissionDenied,
            ) => AppError::StoreUnavailable(err.to_string()),
            _ => AppError::Db(err),
        }
    }
}

impl AppError {
    /// True for failures raised by the record store while executing a write.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            AppError::Db(_) | AppError::StoreUnavailable(_) | AppError::ConstraintViolation(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
