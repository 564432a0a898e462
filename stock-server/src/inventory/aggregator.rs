//! Aggregate recomputation
//!
//! After any variant mutation the product's `stock_quantity` is rewritten as
//! the sum of its active rows, and the `variants` JSON snapshot is rebuilt
//! from the same rows. Both writes happen inside the caller's transaction.

use shared::models::{ProductVariant, VariantMap};
use sqlx::SqliteConnection;

use crate::db::repository::{product, variant};

use super::error::{StockError, StockResult};

/// Outcome of one recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation {
    pub product_id: i64,
    pub previous: i64,
    pub stock_quantity: i64,
}

impl Aggregation {
    pub fn drift(&self) -> i64 {
        self.stock_quantity - self.previous
    }
}

/// Sum and snapshot of the active rows.
///
/// `None` when the product has no rows at all. Rows that are all inactive
/// sum to zero with an empty snapshot.
pub fn summarize(rows: &[ProductVariant]) -> StockResult<Option<(i64, VariantMap)>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut total: i64 = 0;
    let mut map = VariantMap::new();
    for row in rows.iter().filter(|r| r.is_active) {
        let quantity = row.stock_quantity.max(0);
        total = total.checked_add(quantity).ok_or_else(|| {
            StockError::invalid(format!(
                "stock total overflow for product {}",
                row.product_id
            ))
        })?;
        map.entry(row.color.clone())
            .or_default()
            .insert(row.size.clone(), quantity);
    }
    Ok(Some((total, map)))
}

/// Recompute and persist a product's aggregate from its active rows.
///
/// Products that never had rows keep their aggregate as the source of
/// truth. Once rows exist the aggregate always follows them, so a product
/// whose rows are all inactive drops to zero.
pub async fn recompute(
    conn: &mut SqliteConnection,
    product_id: i64,
    now: i64,
) -> StockResult<Aggregation> {
    let record = product::find_by_id(&mut *conn, product_id)
        .await?
        .ok_or(StockError::NotFound(product_id))?;
    let rows = variant::find_by_product(&mut *conn, product_id).await?;
    let previous = record.stock_quantity;

    let (stock_quantity, snapshot) = match summarize(&rows)? {
        Some((total, map)) if map.is_empty() => (total, None),
        Some((total, map)) => {
            let json = serde_json::to_string(&map).map_err(|e| StockError::Database(e.to_string()))?;
            (total, Some(json))
        }
        None => (previous, None),
    };

    product::write_stock(&mut *conn, product_id, stock_quantity, snapshot.as_deref(), now).await?;

    if stock_quantity != previous {
        tracing::debug!(
            product_id,
            previous,
            stock_quantity,
            "Aggregate stock recomputed"
        );
    }

    Ok(Aggregation {
        product_id,
        previous,
        stock_quantity,
    })
}
