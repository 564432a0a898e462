//! Shared types for the stock service
//!
//! Catalog and sale models, error codes, the API response envelope and
//! small utilities used by `stock-server` and its API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
