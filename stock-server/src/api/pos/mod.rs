//! POS API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pos", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/transactions", post(handler::finalize))
        .route("/transactions/{id}", get(handler::get_transaction))
        .route("/daily-sales/{date}", get(handler::daily_sales))
        .route_layer(middleware::from_fn(require_permission(permissions::POS_SELL)))
}
