//! Product catalog operations
//!
//! Product CRUD that keeps variant rows in line with the color/size
//! definition. Stock itself only changes through sales and adjustments.

use std::collections::HashSet;

use shared::models::{
    MAX_STOCK_QUANTITY, MovementReason, Product, ProductCreate, ProductUpdate, VariantMap,
};
use sqlx::SqlitePool;

use crate::db::repository::movement::{self, NewMovement};
use crate::db::repository::{product, variant};

use super::aggregator;
use super::error::{StockError, StockResult};
use super::layout::FallbackPolicy;
use super::store;

fn check_axis(axis: &str, values: &[String]) -> StockResult<()> {
    let mut seen = HashSet::new();
    for value in values {
        if value.trim().is_empty() {
            return Err(StockError::InvalidDefinition(format!("{axis} cannot be blank")));
        }
        if !seen.insert(value.as_str()) {
            return Err(StockError::InvalidDefinition(format!(
                "duplicate {axis} '{value}'"
            )));
        }
    }
    Ok(())
}

/// Validate a color/size definition and the optional initial quantities
pub fn validate_definition(
    colors: &[String],
    sizes: &[String],
    variants: Option<&VariantMap>,
) -> StockResult<()> {
    check_axis("color", colors)?;
    check_axis("size", sizes)?;

    let Some(map) = variants else {
        return Ok(());
    };
    if colors.is_empty() || sizes.is_empty() {
        if map.values().any(|sizes| !sizes.is_empty()) {
            return Err(StockError::InvalidDefinition(
                "variant quantities need both colors and sizes".into(),
            ));
        }
        return Ok(());
    }
    for (color, by_size) in map {
        if !colors.contains(color) {
            return Err(StockError::InvalidDefinition(format!(
                "color '{color}' is not in the color list"
            )));
        }
        for (size, quantity) in by_size {
            if !sizes.contains(size) {
                return Err(StockError::InvalidDefinition(format!(
                    "size '{size}' is not in the size list"
                )));
            }
            if *quantity < 0 {
                return Err(StockError::InvalidDefinition(format!(
                    "negative quantity for {color}/{size}"
                )));
            }
            if *quantity > MAX_STOCK_QUANTITY {
                return Err(StockError::InvalidDefinition(format!(
                    "quantity for {color}/{size} exceeds {MAX_STOCK_QUANTITY}"
                )));
            }
        }
    }
    Ok(())
}

pub async fn create(
    pool: &SqlitePool,
    policy: FallbackPolicy,
    data: &ProductCreate,
) -> StockResult<Product> {
    validate_definition(&data.colors, &data.sizes, data.variants.as_ref())?;
    let structured = !data.colors.is_empty() && !data.sizes.is_empty();
    if structured && data.stock_quantity.is_some() {
        return Err(StockError::InvalidDefinition(
            "stock_quantity is derived from variant quantities when colors and sizes are set"
                .into(),
        ));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let initial = if structured {
        0
    } else {
        data.stock_quantity.unwrap_or(0)
    };
    product::insert(&mut *tx, id, data, initial, now).await?;

    if structured {
        for color in &data.colors {
            for size in &data.sizes {
                let quantity = data
                    .variants
                    .as_ref()
                    .and_then(|m| m.get(color))
                    .and_then(|m| m.get(size))
                    .copied()
                    .unwrap_or(0);
                variant::upsert_quantity(&mut *tx, id, color, size, quantity, now).await?;
                if quantity > 0 {
                    movement::record(
                        &mut *tx,
                        &NewMovement {
                            product_id: id,
                            color: Some(color.as_str()),
                            size: Some(size.as_str()),
                            delta: quantity,
                            quantity_after: quantity,
                            reason: MovementReason::Adjustment,
                            reference: Some("initial"),
                        },
                        now,
                    )
                    .await?;
                }
            }
        }
    } else if initial > 0 {
        movement::record(
            &mut *tx,
            &NewMovement {
                product_id: id,
                color: None,
                size: None,
                delta: initial,
                quantity_after: initial,
                reason: MovementReason::Adjustment,
                reference: Some("initial"),
            },
            now,
        )
        .await?;
    }

    let agg = aggregator::recompute(&mut tx, id, now).await?;
    let stock = store::load(&mut tx, id, policy).await?;
    tx.commit().await?;

    tracing::info!(
        product_id = id,
        name = %data.name,
        variants = stock.layout.entries().len(),
        stock_quantity = agg.stock_quantity,
        "Product created"
    );
    Ok(stock.record.into_product(stock.layout.snapshot()))
}

/// Update catalog fields.
///
/// A changed color/size definition deactivates combinations that left it
/// (their rows and quantities are kept) and activates new ones at 0.
/// Products that were never materialized keep reading through the fallback.
pub async fn update(
    pool: &SqlitePool,
    policy: FallbackPolicy,
    id: i64,
    data: &ProductUpdate,
) -> StockResult<Product> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    if !product::touch(&mut *tx, id, now).await? {
        return Err(StockError::NotFound(id));
    }

    let before = store::load(&mut tx, id, policy).await?;
    if before.record.is_deleted {
        return Err(StockError::NotFound(id));
    }

    let old_colors = before.record.color_list();
    let old_sizes = before.record.size_list();
    let colors = data.colors.clone().unwrap_or_else(|| old_colors.clone());
    let sizes = data.sizes.clone().unwrap_or_else(|| old_sizes.clone());
    validate_definition(&colors, &sizes, None)?;
    let redefined = colors != old_colors || sizes != old_sizes;
    if redefined && (colors.is_empty() || sizes.is_empty()) && !before.layout.is_aggregate_only() {
        return Err(StockError::InvalidDefinition(
            "colors and sizes cannot be cleared on a product with variant stock".into(),
        ));
    }

    // Legacy quantities are pinned to rows under the old definition first
    let materialized = if redefined {
        store::materialize(&mut tx, &before, now).await?.rows
    } else {
        0
    };

    if !product::update(&mut *tx, id, data, now).await? {
        return Err(StockError::NotFound(id));
    }

    if redefined && (before.has_rows || materialized > 0) {
        variant::deactivate_all(&mut *tx, id, now).await?;
        for color in &colors {
            for size in &sizes {
                variant::activate(&mut *tx, id, color, size, now).await?;
            }
        }
        let agg = aggregator::recompute(&mut tx, id, now).await?;
        tracing::info!(
            product_id = id,
            colors = colors.len(),
            sizes = sizes.len(),
            previous = agg.previous,
            stock_quantity = agg.stock_quantity,
            "Product variant definition changed"
        );
    }

    let stock = store::load(&mut tx, id, policy).await?;
    tx.commit().await?;
    Ok(stock.record.into_product(stock.layout.snapshot()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> StockResult<()> {
    let now = shared::util::now_millis();
    if !product::soft_delete(pool, id, now).await? {
        return Err(StockError::NotFound(id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(())
}

pub async fn get(pool: &SqlitePool, policy: FallbackPolicy, id: i64) -> StockResult<Product> {
    let mut conn = pool.acquire().await?;
    let stock = store::load(&mut conn, id, policy).await?;
    if stock.record.is_deleted {
        return Err(StockError::NotFound(id));
    }
    Ok(stock.record.into_product(stock.layout.snapshot()))
}

pub async fn list(pool: &SqlitePool, policy: FallbackPolicy) -> StockResult<Vec<Product>> {
    let mut conn = pool.acquire().await?;
    let records = product::find_all(&mut *conn).await?;
    let mut products = Vec::with_capacity(records.len());
    for record in records {
        let stock = store::load(&mut conn, record.id, policy).await?;
        products.push(stock.record.into_product(stock.layout.snapshot()));
    }
    Ok(products)
}
