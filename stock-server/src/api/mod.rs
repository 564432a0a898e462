//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness and database check (public)
//! - [`products`] - catalog and color/size definition
//! - [`stock`] - stock levels, adjustments, reconcile, movement ledger
//! - [`orders`] - checkout orders
//! - [`pos`] - POS transactions and daily sales
//!
//! Success bodies are the plain JSON value; errors use the
//! [`ApiResponse`](crate::utils::ApiResponse) envelope.

pub mod health;
pub mod middleware;
pub mod orders;
pub mod pos;
pub mod products;
pub mod stock;

use std::time::Duration;

use axum::{Router, middleware as axum_middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

/// Every route, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(products::router())
        .merge(stock::router())
        .merge(orders::router())
        .merge(pos::router())
}

/// Routes with state and the full middleware stack
///
/// Used by the HTTP server and by in-process requests in tests.
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router()
        // require_auth skips public routes itself
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // outermost: sees the final status
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
