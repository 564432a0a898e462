//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] re-exported from `shared::error`
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - request DTO validation

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
