//! Stock API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{AdjustStockRequest, AdjustStockResponse, StockLevels, StockMovement};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppResult;

const DEFAULT_MOVEMENT_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct VariantQuery {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
}

#[derive(Debug, Serialize)]
pub struct VariantStock {
    pub product_id: i64,
    pub color: String,
    pub size: String,
    pub available: i64,
}

#[derive(Debug, Deserialize)]
pub struct MovementQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub product_id: i64,
    pub previous: i64,
    pub stock_quantity: i64,
    pub drift: i64,
}

/// GET /api/stock/{id}
pub async fn levels(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StockLevels>> {
    Ok(Json(state.stock.stock_levels(id).await?))
}

/// GET /api/stock/{id}/variant?color=&size=
pub async fn variant(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<VariantQuery>,
) -> AppResult<Json<VariantStock>> {
    let available = state
        .stock
        .get_available_stock(id, &query.color, &query.size)
        .await?;
    Ok(Json(VariantStock {
        product_id: id,
        color: query.color,
        size: query.size,
        available,
    }))
}

/// POST /api/stock/{id}/adjust
pub async fn adjust(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    user: CurrentUser,
    Json(payload): Json<AdjustStockRequest>,
) -> AppResult<Json<AdjustStockResponse>> {
    let response = state
        .stock
        .adjust(
            id,
            &payload.color,
            &payload.size,
            payload.adjustment,
            Some(&user.username),
        )
        .await?;

    security_log!(
        "INFO",
        "stock_adjusted",
        user_id = user.id,
        product_id = id,
        stock_quantity = response.stock_quantity,
        aggregate = response.aggregate
    );
    Ok(Json(response))
}

/// POST /api/stock/{id}/reconcile
pub async fn reconcile(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReconcileResponse>> {
    let agg = state.stock.reconcile(id).await?;
    Ok(Json(ReconcileResponse {
        product_id: agg.product_id,
        previous: agg.previous,
        stock_quantity: agg.stock_quantity,
        drift: agg.drift(),
    }))
}

/// GET /api/stock/{id}/movements?limit=
pub async fn movements(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let limit = query.limit.unwrap_or(DEFAULT_MOVEMENT_LIMIT);
    Ok(Json(state.stock.movements(id, limit).await?))
}
