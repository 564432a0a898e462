//! Stock error taxonomy

use shared::error::{AppError, ErrorCode};
use shared::models::StockShortfall;
use thiserror::Error;

use crate::db::repository::RepoError;

/// Errors raised by stock reads and mutations
#[derive(Debug, Error)]
pub enum StockError {
    /// Unknown product
    #[error("Product {0} not found")]
    NotFound(i64),

    /// Product is inactive or soft-deleted
    #[error("Product {0} is not available for sale")]
    Unavailable(i64),

    /// Color/size is neither stored nor part of the product definition
    #[error("Product {product_id} has no variant {color}/{size}")]
    UnknownVariant {
        product_id: i64,
        color: String,
        size: String,
    },

    /// Sale submitted without line items
    #[error("Sale has no line items")]
    EmptySale,

    /// Malformed request (non-positive or out-of-range quantity, bad sale id)
    #[error("{0}")]
    Invalid(String),

    /// Color/size definition or initial variant map is inconsistent
    #[error("Invalid product definition: {0}")]
    InvalidDefinition(String),

    /// Requested quantities exceed availability; lists every offending line
    #[error("Insufficient stock for {} line(s)", .0.len())]
    InsufficientStock(Vec<StockShortfall>),

    /// Stored variant snapshot is unparsable. Absorbed by the layout
    /// resolver (logged, fallback applied), never returned to callers.
    #[error("Stored variants of product {product_id} are corrupt: {reason}")]
    DataCorruption { product_id: i64, reason: String },

    /// SQLite write lock contention; safe to retry the whole operation
    #[error("Concurrent stock update, retry")]
    ConcurrencyConflict,

    /// Sale id was already committed
    #[error("Sale {0} was already processed")]
    DuplicateSale(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl StockError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StockError::ConcurrencyConflict)
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        StockError::Invalid(msg.into())
    }
}

impl From<RepoError> for StockError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Busy(_) => StockError::ConcurrencyConflict,
            RepoError::Validation(msg) => StockError::Invalid(msg),
            RepoError::NotFound(msg) | RepoError::Duplicate(msg) | RepoError::Database(msg) => {
                StockError::Database(msg)
            }
        }
    }
}

impl From<sqlx::Error> for StockError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::from(err).into()
    }
}

/// Result type for stock operations
pub type StockResult<T> = Result<T, StockError>;

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::NotFound(id) => {
                AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)
            }
            StockError::Unavailable(id) => {
                AppError::new(ErrorCode::ProductUnavailable).with_detail("product_id", id)
            }
            StockError::UnknownVariant {
                product_id,
                color,
                size,
            } => AppError::new(ErrorCode::VariantUnknown)
                .with_detail("product_id", product_id)
                .with_detail("color", color)
                .with_detail("size", size),
            StockError::EmptySale => AppError::new(ErrorCode::OrderEmpty),
            StockError::Invalid(msg) => AppError::validation(msg),
            StockError::InvalidDefinition(msg) => {
                AppError::with_message(ErrorCode::ProductDefinitionInvalid, msg)
            }
            StockError::InsufficientStock(items) => {
                let message = items
                    .iter()
                    .map(|s| s.message())
                    .collect::<Vec<_>>()
                    .join("; ");
                let details: Vec<serde_json::Value> = items
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "product_id": s.product_id,
                            "product_name": s.product_name,
                            "color": s.color,
                            "size": s.size,
                            "requested": s.requested,
                            "available": s.available,
                            "message": s.message(),
                        })
                    })
                    .collect();
                AppError::with_message(ErrorCode::InsufficientStock, message)
                    .with_detail("items", details)
            }
            StockError::ConcurrencyConflict => AppError::new(ErrorCode::StockConflict),
            StockError::DuplicateSale(sale_id) => {
                AppError::new(ErrorCode::SaleAlreadyProcessed).with_detail("sale_id", sale_id)
            }
            StockError::DataCorruption { product_id, reason } => {
                AppError::with_message(ErrorCode::StorageCorrupted, reason)
                    .with_detail("product_id", product_id)
            }
            StockError::Database(msg) => AppError::database(msg),
        }
    }
}
