//! Stock API
//!
//! | Path | Method | Permission |
//! |------|--------|------------|
//! | /api/stock/{id} | GET | auth |
//! | /api/stock/{id}/variant?color=&size= | GET | auth |
//! | /api/stock/{id}/adjust | POST | stock:adjust |
//! | /api/stock/{id}/reconcile | POST | stock:adjust |
//! | /api/stock/{id}/movements?limit= | GET | stock:adjust |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stock", read_routes().merge(admin_routes()))
}

fn read_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::levels))
        .route("/{id}/variant", get(handler::variant))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}/adjust", post(handler::adjust))
        .route("/{id}/reconcile", post(handler::reconcile))
        .route("/{id}/movements", get(handler::movements))
        .route_layer(middleware::from_fn(require_permission(
            permissions::STOCK_ADJUST,
        )))
}
