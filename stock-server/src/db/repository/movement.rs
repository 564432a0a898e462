//! Stock Movement Repository (ledger)

use super::RepoResult;
use shared::models::{MovementReason, StockMovement};
use sqlx::{Executor, Sqlite};

/// A ledger entry to append
#[derive(Debug, Clone)]
pub struct NewMovement<'a> {
    pub product_id: i64,
    pub color: Option<&'a str>,
    pub size: Option<&'a str>,
    pub delta: i64,
    pub quantity_after: i64,
    pub reason: MovementReason,
    pub reference: Option<&'a str>,
}

pub async fn record<'e, E>(executor: E, movement: &NewMovement<'_>, now: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO stock_movement (product_id, color, size, delta, quantity_after, reason, reference, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(movement.product_id)
    .bind(movement.color)
    .bind(movement.size)
    .bind(movement.delta)
    .bind(movement.quantity_after)
    .bind(movement.reason.as_str())
    .bind(movement.reference)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

/// Most recent movements of a product first
pub async fn find_by_product<'e, E>(executor: E, product_id: i64, limit: i64) -> RepoResult<Vec<StockMovement>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, StockMovement>(
        "SELECT id, product_id, color, size, delta, quantity_after, reason, reference, created_at FROM stock_movement WHERE product_id = ? ORDER BY id DESC LIMIT ?",
    )
    .bind(product_id)
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}
