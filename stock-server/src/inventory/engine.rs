//! Sale engine
//!
//! `reserve_and_decrement` turns a list of sale lines into one all-or-nothing
//! stock write:
//!
//! 1. validate and merge the lines;
//! 2. pre-validate against committed stock (no locks held) so hopeless sales
//!    fail fast with every shortfall listed;
//! 3. in one transaction: claim the sale id (first write, takes SQLite's
//!    write lock), materialize legacy products, decrement each line with a
//!    conditional update, recompute aggregates, append ledger entries and
//!    let the channel record its own rows;
//! 4. commit, or roll back everything on the first failure.
//!
//! Two sales racing for the last unit serialize on the write lock; the
//! loser's conditional update matches no row and its sale is rejected.

use std::collections::HashMap;

use shared::models::{
    AggregateLevel, MovementReason, SaleChannel, SaleLine, SaleOutcome, StockShortfall,
    VariantLevel,
};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::db::repository::movement::{self, NewMovement};
use crate::db::repository::product::{self, ProductRecord};
use crate::db::repository::{sale, variant, RepoError};

use super::aggregator;
use super::error::{StockError, StockResult};
use super::layout::FallbackPolicy;
use super::store::{self, ProductStock};

/// Longest accepted sale id
pub const MAX_SALE_ID_LEN: usize = 64;

/// A committed line as channel recorders see it
#[derive(Debug, Clone)]
pub struct CommittedLine {
    pub product_id: i64,
    pub product_name: String,
    /// Price in cents at commit time
    pub unit_price: i64,
    /// `None` for products sold from the aggregate
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: i64,
}

impl CommittedLine {
    pub fn line_total(&self) -> StockResult<i64> {
        self.unit_price.checked_mul(self.quantity).ok_or_else(|| {
            StockError::invalid(format!(
                "line total overflow for product {}",
                self.product_id
            ))
        })
    }
}

/// Sale data handed to a [`SaleRecorder`] before commit
#[derive(Debug, Clone)]
pub struct CommittedSale {
    pub sale_id: String,
    pub channel: SaleChannel,
    pub lines: Vec<CommittedLine>,
    pub now: i64,
}

impl CommittedSale {
    pub fn total(&self) -> StockResult<i64> {
        self.lines.iter().try_fold(0i64, |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or_else(|| StockError::invalid("sale total overflow"))
        })
    }

    pub fn item_count(&self) -> StockResult<i64> {
        self.lines.iter().try_fold(0i64, |acc, line| {
            acc.checked_add(line.quantity)
                .ok_or_else(|| StockError::invalid("sale item count overflow"))
        })
    }
}

/// Channel hook that writes the channel's own rows (order, POS transaction)
/// inside the sale transaction.
///
/// May run more than once when the sale is retried; each run's writes are
/// rolled back with its transaction.
#[allow(async_fn_in_trait)]
pub trait SaleRecorder {
    type Output;

    async fn record(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        sale: &CommittedSale,
    ) -> StockResult<Self::Output>;
}

/// Recorder for plain stock sales with no channel rows
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecord;

impl SaleRecorder for NoRecord {
    type Output = ();

    async fn record(
        &self,
        _tx: &mut Transaction<'_, Sqlite>,
        _sale: &CommittedSale,
    ) -> StockResult<()> {
        Ok(())
    }
}

/// Check the request shape and merge repeated (product, color, size) lines.
///
/// Merged lines keep the position of their first occurrence.
pub fn normalize_lines(sale_id: &str, lines: &[SaleLine]) -> StockResult<Vec<SaleLine>> {
    let trimmed = sale_id.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_SALE_ID_LEN {
        return Err(StockError::invalid(format!(
            "sale id must be 1 to {MAX_SALE_ID_LEN} characters"
        )));
    }
    if lines.is_empty() {
        return Err(StockError::EmptySale);
    }

    let mut merged: Vec<SaleLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity <= 0 {
            return Err(StockError::invalid(format!(
                "quantity must be positive (product {}, got {})",
                line.product_id, line.quantity
            )));
        }
        match merged.iter_mut().find(|m| {
            m.product_id == line.product_id && m.color == line.color && m.size == line.size
        }) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(line.quantity).ok_or_else(|| {
                    StockError::invalid(format!("quantity overflow for product {}", line.product_id))
                })?;
            }
            None => merged.push(line.clone()),
        }
    }
    Ok(merged)
}

/// Distinct product ids in first-occurrence order
fn product_ids(lines: &[SaleLine]) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::new();
    for line in lines {
        if !ids.contains(&line.product_id) {
            ids.push(line.product_id);
        }
    }
    ids
}

fn shortfall(stock: &ProductStock, line: &SaleLine, available: i64) -> StockShortfall {
    let aggregate_only = stock.layout.is_aggregate_only();
    StockShortfall {
        product_id: line.product_id,
        product_name: stock.record.name.clone(),
        color: (!aggregate_only).then(|| line.color.clone()),
        size: (!aggregate_only).then(|| line.size.clone()),
        requested: line.quantity,
        available,
    }
}

/// Every shortfall of `lines` against the loaded products
fn collect_shortfalls(
    products: &HashMap<i64, ProductStock>,
    lines: &[SaleLine],
) -> StockResult<Vec<StockShortfall>> {
    let mut shortfalls = Vec::new();
    for line in lines {
        let stock = products
            .get(&line.product_id)
            .ok_or(StockError::NotFound(line.product_id))?;
        let available = stock.layout.available(&line.color, &line.size)?;
        if line.quantity > available {
            shortfalls.push(shortfall(stock, line, available));
        }
    }
    Ok(shortfalls)
}

/// Fail-fast check against committed state.
///
/// Runs in a read transaction for a consistent view; WAL readers never block
/// writers, so nothing is held once this returns.
async fn prevalidate(
    pool: &SqlitePool,
    policy: FallbackPolicy,
    sale_id: &str,
    lines: &[SaleLine],
) -> StockResult<()> {
    let mut tx = pool.begin().await?;

    if sale::exists(&mut *tx, sale_id).await? {
        return Err(StockError::DuplicateSale(sale_id.to_string()));
    }

    let mut products = HashMap::new();
    for id in product_ids(lines) {
        products.insert(id, store::load_sellable(&mut tx, id, policy).await?);
    }
    let shortfalls = collect_shortfalls(&products, lines)?;
    tx.rollback().await?;

    if !shortfalls.is_empty() {
        return Err(StockError::InsufficientStock(shortfalls));
    }
    Ok(())
}

/// Validate, decrement and record a sale atomically.
///
/// `lines` must already be normalized. One attempt; the caller owns the
/// retry loop.
pub async fn reserve_and_decrement<R: SaleRecorder>(
    pool: &SqlitePool,
    policy: FallbackPolicy,
    sale_id: &str,
    channel: SaleChannel,
    lines: &[SaleLine],
    recorder: &R,
) -> StockResult<(SaleOutcome, R::Output)> {
    prevalidate(pool, policy, sale_id, lines).await?;

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    sale::claim(&mut *tx, sale_id, channel, now)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => StockError::DuplicateSale(sale_id.to_string()),
            other => other.into(),
        })?;

    // Reload under the write lock; committed state may have moved since
    // pre-validation.
    let ids = product_ids(lines);
    let mut products: HashMap<i64, ProductStock> = HashMap::with_capacity(ids.len());
    for &id in &ids {
        let stock = store::load_sellable(&mut tx, id, policy).await?;
        store::materialize(&mut tx, &stock, now).await?;
        products.insert(id, stock);
    }

    let mut shortfalls = Vec::new();
    for line in lines {
        let stock = products
            .get(&line.product_id)
            .ok_or(StockError::NotFound(line.product_id))?;
        // Rejects combinations outside the definition
        stock.layout.available(&line.color, &line.size)?;

        let taken = if stock.layout.is_aggregate_only() {
            product::decrement_aggregate_if_available(&mut *tx, line.product_id, line.quantity, now)
                .await?
        } else {
            variant::decrement_if_available(
                &mut *tx,
                line.product_id,
                &line.color,
                &line.size,
                line.quantity,
                now,
            )
            .await?
        };

        if !taken {
            let available = if stock.layout.is_aggregate_only() {
                store::aggregate_quantity(&mut tx, line.product_id).await?
            } else {
                store::row_quantity(&mut tx, line.product_id, &line.color, &line.size).await?
            };
            shortfalls.push(shortfall(stock, line, available));
        }
    }

    if !shortfalls.is_empty() {
        tx.rollback().await?;
        tracing::info!(
            sale_id,
            shortfalls = shortfalls.len(),
            "Sale rejected under lock, stock changed since validation"
        );
        return Err(StockError::InsufficientStock(shortfalls));
    }

    let mut updated_aggregates = Vec::with_capacity(ids.len());
    for &id in &ids {
        let agg = aggregator::recompute(&mut tx, id, now).await?;
        updated_aggregates.push(AggregateLevel {
            product_id: id,
            stock_quantity: agg.stock_quantity,
        });
    }

    let mut updated_variants = Vec::new();
    let mut committed = Vec::with_capacity(lines.len());
    for line in lines {
        let stock = products
            .get(&line.product_id)
            .ok_or(StockError::NotFound(line.product_id))?;
        let aggregate_only = stock.layout.is_aggregate_only();

        let quantity_after = if aggregate_only {
            store::aggregate_quantity(&mut tx, line.product_id).await?
        } else {
            let after =
                store::row_quantity(&mut tx, line.product_id, &line.color, &line.size).await?;
            updated_variants.push(VariantLevel {
                product_id: line.product_id,
                color: line.color.clone(),
                size: line.size.clone(),
                stock_quantity: after,
            });
            after
        };

        let (color, size) = if aggregate_only {
            (None, None)
        } else {
            (Some(line.color.as_str()), Some(line.size.as_str()))
        };
        movement::record(
            &mut *tx,
            &NewMovement {
                product_id: line.product_id,
                color,
                size,
                delta: -line.quantity,
                quantity_after,
                reason: MovementReason::Sale,
                reference: Some(sale_id),
            },
            now,
        )
        .await?;

        committed.push(committed_line(&stock.record, line, aggregate_only));
    }

    let sale = CommittedSale {
        sale_id: sale_id.to_string(),
        channel,
        lines: committed,
        now,
    };
    let units = sale.item_count()?;
    let output = recorder.record(&mut tx, &sale).await?;

    tx.commit().await?;

    tracing::info!(
        sale_id,
        channel = channel.as_str(),
        lines = lines.len(),
        units,
        "Sale committed"
    );

    Ok((
        SaleOutcome {
            sale_id: sale_id.to_string(),
            updated_variants,
            updated_aggregates,
        },
        output,
    ))
}

fn committed_line(record: &ProductRecord, line: &SaleLine, aggregate_only: bool) -> CommittedLine {
    CommittedLine {
        product_id: record.id,
        product_name: record.name.clone(),
        unit_price: record.price,
        color: (!aggregate_only).then(|| line.color.clone()),
        size: (!aggregate_only).then(|| line.size.clone()),
        quantity: line.quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_merges_repeated_lines_in_first_seen_order() {
        let lines = vec![
            SaleLine::new(1, "Black", "9", 1),
            SaleLine::new(2, "", "", 2),
            SaleLine::new(1, "Black", "9", 2),
            SaleLine::new(1, "Black", "10", 1),
        ];
        let merged = normalize_lines("sale-1", &lines).unwrap();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], SaleLine::new(1, "Black", "9", 3));
        assert_eq!(merged[1].product_id, 2);
        assert_eq!(merged[2].size, "10");
    }

    #[test]
    fn normalize_rejects_malformed_sales() {
        assert!(matches!(
            normalize_lines("sale-1", &[]),
            Err(StockError::EmptySale)
        ));
        assert!(matches!(
            normalize_lines("sale-1", &[SaleLine::new(1, "Black", "9", 0)]),
            Err(StockError::Invalid(_))
        ));
        assert!(matches!(
            normalize_lines("  ", &[SaleLine::new(1, "Black", "9", 1)]),
            Err(StockError::Invalid(_))
        ));
        let long = "x".repeat(MAX_SALE_ID_LEN + 1);
        assert!(normalize_lines(&long, &[SaleLine::new(1, "Black", "9", 1)]).is_err());
    }

    #[test]
    fn committed_sale_totals() {
        let line = |price, quantity| CommittedLine {
            product_id: 1,
            product_name: "Runner".into(),
            unit_price: price,
            color: None,
            size: None,
            quantity,
        };
        let sale = CommittedSale {
            sale_id: "s".into(),
            channel: SaleChannel::Direct,
            lines: vec![line(8900, 2), line(300, 3)],
            now: 0,
        };
        assert_eq!(sale.total().unwrap(), 18_700);
        assert_eq!(sale.item_count().unwrap(), 5);
    }

    #[test]
    fn overflowing_line_total_is_rejected() {
        let line = CommittedLine {
            product_id: 1,
            product_name: "Runner".into(),
            unit_price: i64::MAX / 2,
            color: None,
            size: None,
            quantity: 3,
        };
        assert!(matches!(line.line_total(), Err(StockError::Invalid(_))));

        let sale = CommittedSale {
            sale_id: "s".into(),
            channel: SaleChannel::Direct,
            lines: vec![
                CommittedLine { quantity: 1, ..line.clone() },
                CommittedLine { quantity: 2, ..line },
            ],
            now: 0,
        };
        assert!(matches!(sale.total(), Err(StockError::Invalid(_))));
    }
}
