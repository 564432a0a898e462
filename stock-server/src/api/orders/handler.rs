//! Checkout order handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{CheckoutRequest, OrderDetail};

use crate::auth::CurrentUser;
use crate::channels::checkout;
use crate::core::ServerState;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/orders/checkout
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<OrderDetail>> {
    validate_payload(&payload)?;
    let detail = checkout::place_order(&state.stock, &payload, Some(user.id)).await?;
    Ok(Json(detail))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = checkout::find_order(&state.stock, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id))?;
    Ok(Json(detail))
}
