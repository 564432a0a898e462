//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;

/// GET /api/products - active and inactive products, deleted ones hidden
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.stock.list_products().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = state.stock.get_product(id).await?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_payload(&payload)?;
    let product = state.stock.create_product(&payload).await?;

    tracing::info!(product_id = product.id, user = %user.username, "Product created via API");
    Ok(Json(product))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validate_payload(&payload)?;
    let product = state.stock.update_product(id, &payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.stock.delete_product(id).await?;
    Ok(Json(true))
}
