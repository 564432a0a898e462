//! Data models
//!
//! Shared between stock-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod order;
pub mod pos;
pub mod product;
pub mod stock;
pub mod variant;

// Re-exports
pub use order::*;
pub use pos::*;
pub use product::*;
pub use stock::*;
pub use variant::*;
