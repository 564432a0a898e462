//! POS handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DailySales, PosSaleRequest, PosTransactionDetail};

use crate::auth::CurrentUser;
use crate::channels::pos;
use crate::core::ServerState;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/pos/transactions - the cashier is the authenticated user
pub async fn finalize(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PosSaleRequest>,
) -> AppResult<Json<PosTransactionDetail>> {
    validate_payload(&payload)?;
    let detail = pos::finalize_sale(&state.stock, &payload, user.id, &user.display_name).await?;
    Ok(Json(detail))
}

/// GET /api/pos/transactions/{id}
pub async fn get_transaction(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PosTransactionDetail>> {
    let detail = pos::find_transaction(&state.stock, id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::PosTransactionNotFound).with_detail("transaction_id", id)
        })?;
    Ok(Json(detail))
}

/// GET /api/pos/daily-sales/{date} - `date` is a `YYYY-MM-DD` business date
pub async fn daily_sales(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<DailySales>> {
    if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(AppError::validation(format!("Invalid business date: {date}")));
    }
    let sales = pos::daily_sales(&state.stock, &date).await?.ok_or_else(|| {
        AppError::new(ErrorCode::DailySalesNotFound).with_detail("business_date", date.clone())
    })?;
    Ok(Json(sales))
}
