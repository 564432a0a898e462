//! Variant store
//!
//! Loads a product together with its variant rows and resolves the layout
//! reads and mutations work against. Also owns materialization: the first
//! mutation of a product that still has unbacked (legacy or fallback)
//! entries writes them out as `product_variant` rows.

use shared::models::MovementReason;
use sqlx::SqliteConnection;

use crate::db::repository::movement::{self, NewMovement};
use crate::db::repository::product::{self, ProductRecord};
use crate::db::repository::variant;

use super::error::{StockError, StockResult};
use super::layout::{FallbackPolicy, LayoutInput, VariantLayout};

/// A product and its resolved stock map
#[derive(Debug, Clone)]
pub struct ProductStock {
    pub record: ProductRecord,
    pub layout: VariantLayout,
    /// Whether any `product_variant` row (active or not) exists
    pub has_rows: bool,
}

impl ProductStock {
    pub fn product_id(&self) -> i64 {
        self.record.id
    }
}

/// Load a product and resolve its layout on one connection
pub async fn load(
    conn: &mut SqliteConnection,
    product_id: i64,
    policy: FallbackPolicy,
) -> StockResult<ProductStock> {
    let record = product::find_by_id(&mut *conn, product_id)
        .await?
        .ok_or(StockError::NotFound(product_id))?;
    let rows = variant::find_by_product(&mut *conn, product_id).await?;

    let colors = record.color_list();
    let sizes = record.size_list();
    let layout = VariantLayout::resolve(
        LayoutInput {
            product_id,
            aggregate: record.stock_quantity,
            colors: &colors,
            sizes: &sizes,
            rows: &rows,
            snapshot: record.variants.as_deref(),
        },
        policy,
    );

    Ok(ProductStock {
        record,
        layout,
        has_rows: !rows.is_empty(),
    })
}

/// Load a product that must be sellable
pub async fn load_sellable(
    conn: &mut SqliteConnection,
    product_id: i64,
    policy: FallbackPolicy,
) -> StockResult<ProductStock> {
    let stock = load(conn, product_id, policy).await?;
    if !stock.record.is_sellable() {
        return Err(StockError::Unavailable(product_id));
    }
    Ok(stock)
}

/// Outcome of [`materialize`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Materialization {
    /// Rows created
    pub rows: usize,
    /// Aggregate change written to the ledger as a RECONCILE movement
    /// (negative when an uneven split left units unallocated)
    pub delta: i64,
}

/// Write every unbacked entry of the layout as a row.
///
/// Must run inside the mutating transaction, after its first write.
/// Existing rows are never overwritten. When a product gets its first rows
/// and they do not add up to the stored aggregate, the difference is
/// recorded as a RECONCILE movement.
pub async fn materialize(
    conn: &mut SqliteConnection,
    stock: &ProductStock,
    now: i64,
) -> StockResult<Materialization> {
    let layout = &stock.layout;
    if layout.is_aggregate_only() {
        return Ok(Materialization::default());
    }

    let mut created = 0;
    for entry in layout.unmaterialized() {
        if variant::insert_if_absent(
            &mut *conn,
            layout.product_id,
            &entry.color,
            &entry.size,
            entry.stock_quantity,
            now,
        )
        .await?
        {
            created += 1;
        }
    }

    if created == 0 {
        return Ok(Materialization::default());
    }
    tracing::info!(
        product_id = layout.product_id,
        rows = created,
        "Materialized variant rows"
    );

    let allocated = layout.total()?;
    let delta = allocated - layout.aggregate;
    if stock.has_rows || delta == 0 {
        return Ok(Materialization { rows: created, delta: 0 });
    }

    tracing::warn!(
        product_id = layout.product_id,
        aggregate = layout.aggregate,
        allocated,
        delta,
        "Legacy aggregate does not match materialized rows, recording difference"
    );
    movement::record(
        &mut *conn,
        &NewMovement {
            product_id: layout.product_id,
            color: None,
            size: None,
            delta,
            quantity_after: allocated,
            reason: MovementReason::Reconcile,
            reference: Some("materialize"),
        },
        now,
    )
    .await?;
    Ok(Materialization { rows: created, delta })
}

/// Current quantity of one row, read inside the transaction
pub async fn row_quantity(
    conn: &mut SqliteConnection,
    product_id: i64,
    color: &str,
    size: &str,
) -> StockResult<i64> {
    let row = variant::find_one(&mut *conn, product_id, color, size).await?;
    Ok(row
        .filter(|r| r.is_active)
        .map(|r| r.stock_quantity)
        .unwrap_or(0))
}

/// Current aggregate, read inside the transaction
pub async fn aggregate_quantity(conn: &mut SqliteConnection, product_id: i64) -> StockResult<i64> {
    let record = product::find_by_id(&mut *conn, product_id)
        .await?
        .ok_or(StockError::NotFound(product_id))?;
    Ok(record.stock_quantity)
}
