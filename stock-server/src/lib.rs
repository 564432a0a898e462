//! Stock Server - per-variant inventory for a footwear/apparel shop
//!
//! # Overview
//!
//! Stock is held per product × color × size. Checkout and POS sales go
//! through one atomic decrement engine; the product's aggregate
//! `stock_quantity` is always recomputed from the variant rows.
//!
//! - **Inventory** (`inventory`): decrement engine, adjustments, reconcile, catalog
//! - **Sale channels** (`channels`): checkout orders and POS transactions
//! - **Database** (`db`): SQLite via sqlx, embedded migrations
//! - **Auth** (`auth`): bearer JWT validation and permissions
//! - **HTTP API** (`api`): axum routes and handlers
//!
//! # Layout
//!
//! ```text
//! stock-server/src/
//! ├── core/          # config, state, errors, server
//! ├── auth/          # JWT, permissions, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── inventory/     # stock engine
//! ├── channels/      # checkout and POS recorders
//! ├── db/            # pool and repositories
//! └── utils/         # logging, validation, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod channels;
pub mod core;
pub mod db;
pub mod inventory;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use inventory::{StockError, StockService};
pub use utils::{AppError, AppResult};

pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   _____ __             __
  / ___// /_____  _____/ /__
  \__ \/ __/ __ \/ ___/ //_/
 ___/ / /_/ /_/ / /__/ ,<
/____/\__/\____/\___/_/|_|
    "#
    );
}
