//! Admin stock adjustments and reconciliation
//!
//! Adjustments bypass sale availability checks but share the sale path's
//! transaction shape: first write, materialize, mutate, recompute, ledger.

use shared::models::{AdjustStockResponse, MAX_STOCK_QUANTITY, MovementReason, StockAdjustment};
use sqlx::SqlitePool;

use crate::db::repository::movement::{self, NewMovement};
use crate::db::repository::{product, variant};

use super::aggregator::{self, Aggregation};
use super::error::{StockError, StockResult};
use super::layout::FallbackPolicy;
use super::store;

/// Apply a `set`/`delta` adjustment to one variant, or to the aggregate of a
/// product without color/size structure.
///
/// Negative results are floored at 0; results above [`MAX_STOCK_QUANTITY`]
/// are rejected. `reference` lands in the ledger (usually the operator's
/// username).
pub async fn adjust(
    pool: &SqlitePool,
    policy: FallbackPolicy,
    product_id: i64,
    color: &str,
    size: &str,
    adjustment: StockAdjustment,
    reference: Option<&str>,
) -> StockResult<AdjustStockResponse> {
    if !adjustment.is_within_bounds() {
        return Err(StockError::invalid(format!(
            "adjustment must stay within 0..={MAX_STOCK_QUANTITY} (got {adjustment:?})"
        )));
    }

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    if !product::touch(&mut *tx, product_id, now).await? {
        return Err(StockError::NotFound(product_id));
    }

    let stock = store::load(&mut tx, product_id, policy).await?;

    if stock.layout.is_aggregate_only() {
        let current = stock.record.stock_quantity;
        let updated = bounded(adjustment.apply(current))?;
        product::set_aggregate(&mut *tx, product_id, updated, now).await?;
        aggregator::recompute(&mut tx, product_id, now).await?;
        movement::record(
            &mut *tx,
            &NewMovement {
                product_id,
                color: None,
                size: None,
                delta: updated - current,
                quantity_after: updated,
                reason: MovementReason::Adjustment,
                reference,
            },
            now,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(product_id, current, updated, "Aggregate stock adjusted");
        return Ok(AdjustStockResponse {
            product_id,
            color: None,
            size: None,
            stock_quantity: updated,
            aggregate: updated,
        });
    }

    let current = stock.layout.available(color, size)?;
    store::materialize(&mut tx, &stock, now).await?;

    let updated = bounded(adjustment.apply(current))?;
    variant::upsert_quantity(&mut *tx, product_id, color, size, updated, now).await?;
    let agg = aggregator::recompute(&mut tx, product_id, now).await?;
    movement::record(
        &mut *tx,
        &NewMovement {
            product_id,
            color: Some(color),
            size: Some(size),
            delta: updated - current,
            quantity_after: updated,
            reason: MovementReason::Adjustment,
            reference,
        },
        now,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        product_id,
        color,
        size,
        current,
        updated,
        aggregate = agg.stock_quantity,
        "Variant stock adjusted"
    );
    Ok(AdjustStockResponse {
        product_id,
        color: Some(color.to_string()),
        size: Some(size.to_string()),
        stock_quantity: updated,
        aggregate: agg.stock_quantity,
    })
}

fn bounded(quantity: i64) -> StockResult<i64> {
    if quantity > MAX_STOCK_QUANTITY {
        return Err(StockError::invalid(format!(
            "stock quantity cannot exceed {MAX_STOCK_QUANTITY} (got {quantity})"
        )));
    }
    Ok(quantity)
}

/// Rebuild a product's aggregate and snapshot from its rows.
///
/// Materializes legacy products first. Drift between the stored aggregate
/// and the rows is logged and written to the ledger, minus what
/// materialization already recorded.
pub async fn reconcile(
    pool: &SqlitePool,
    policy: FallbackPolicy,
    product_id: i64,
) -> StockResult<Aggregation> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    if !product::touch(&mut *tx, product_id, now).await? {
        return Err(StockError::NotFound(product_id));
    }

    let stock = store::load(&mut tx, product_id, policy).await?;
    let materialized = store::materialize(&mut tx, &stock, now).await?;
    let agg = aggregator::recompute(&mut tx, product_id, now).await?;

    let unrecorded = agg.drift() - materialized.delta;
    if unrecorded != 0 {
        tracing::warn!(
            product_id,
            previous = agg.previous,
            stock_quantity = agg.stock_quantity,
            drift = unrecorded,
            "Aggregate stock drifted from variant rows"
        );
        movement::record(
            &mut *tx,
            &NewMovement {
                product_id,
                color: None,
                size: None,
                delta: unrecorded,
                quantity_after: agg.stock_quantity,
                reason: MovementReason::Reconcile,
                reference: None,
            },
            now,
        )
        .await?;
    }
    tx.commit().await?;
    Ok(agg)
}
