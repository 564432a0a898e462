//! Repository Module
//!
//! Free-function SQLite repositories. Single-statement functions are generic
//! over the executor so they run on the pool or inside an open transaction;
//! multi-statement helpers take the transaction explicitly.

// Catalog
pub mod product;
pub mod variant;

// Stock bookkeeping
pub mod movement;
pub mod sale;

// Sale channels
pub mod order;
pub mod pos;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database busy: {0}")]
    Busy(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// SQLite primary/extended result codes of the BUSY and LOCKED families
const SQLITE_BUSY_CODES: &[&str] = &["5", "6", "261", "262", "517", "773"];

/// Whether an sqlx error means another writer holds the database lock
pub fn is_busy_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err
                .code()
                .is_some_and(|code| SQLITE_BUSY_CODES.contains(&code.as_ref()))
                || db_err.message().contains("database is locked")
        }
        sqlx::Error::PoolTimedOut => true,
        _ => false,
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if is_busy_error(&err) {
            return RepoError::Busy(err.to_string());
        }
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Busy(msg) => AppError::with_message(ErrorCode::StockConflict, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
