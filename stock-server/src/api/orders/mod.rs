//! Checkout order API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/checkout", post(handler::checkout))
        .route("/{id}", get(handler::get_by_id))
        .route_layer(middleware::from_fn(require_permission(
            permissions::ORDERS_PLACE,
        )))
}
