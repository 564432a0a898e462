//! Product Variant Repository
//!
//! `product_variant` rows are the authoritative per-variant stock.

use super::RepoResult;
use shared::models::ProductVariant;
use sqlx::{Executor, Sqlite};

const VARIANT_SELECT: &str =
    "SELECT product_id, color, size, stock_quantity, is_active, updated_at FROM product_variant";

/// All rows of a product, active or not
pub async fn find_by_product<'e, E>(executor: E, product_id: i64) -> RepoResult<Vec<ProductVariant>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VARIANT_SELECT} WHERE product_id = ? ORDER BY color, size");
    let rows = sqlx::query_as::<_, ProductVariant>(&sql)
        .bind(product_id)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn find_one<'e, E>(
    executor: E,
    product_id: i64,
    color: &str,
    size: &str,
) -> RepoResult<Option<ProductVariant>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VARIANT_SELECT} WHERE product_id = ? AND color = ? AND size = ?");
    let row = sqlx::query_as::<_, ProductVariant>(&sql)
        .bind(product_id)
        .bind(color)
        .bind(size)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Insert a row unless one already exists for the combination
pub async fn insert_if_absent<'e, E>(
    executor: E,
    product_id: i64,
    color: &str,
    size: &str,
    quantity: i64,
    now: i64,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO product_variant (product_id, color, size, stock_quantity, is_active, updated_at) VALUES (?1, ?2, ?3, MAX(0, ?4), 1, ?5)",
    )
    .bind(product_id)
    .bind(color)
    .bind(size)
    .bind(quantity)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Set a row's quantity (floored at 0), creating the row if needed
pub async fn upsert_quantity<'e, E>(
    executor: E,
    product_id: i64,
    color: &str,
    size: &str,
    quantity: i64,
    now: i64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO product_variant (product_id, color, size, stock_quantity, is_active, updated_at) VALUES (?1, ?2, ?3, MAX(0, ?4), 1, ?5) ON CONFLICT (product_id, color, size) DO UPDATE SET stock_quantity = excluded.stock_quantity, updated_at = excluded.updated_at",
    )
    .bind(product_id)
    .bind(color)
    .bind(size)
    .bind(quantity)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

/// Atomic "decrement by n only if at least n are left".
///
/// Returns false (no row touched) on shortfall or when the row is missing
/// or inactive. The `MAX(0, ..)` floor never triggers given the guard; it
/// keeps the CHECK constraint unreachable.
pub async fn decrement_if_available<'e, E>(
    executor: E,
    product_id: i64,
    color: &str,
    size: &str,
    quantity: i64,
    now: i64,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE product_variant SET stock_quantity = MAX(0, stock_quantity - ?1), updated_at = ?2 WHERE product_id = ?3 AND color = ?4 AND size = ?5 AND is_active = 1 AND stock_quantity >= ?1",
    )
    .bind(quantity)
    .bind(now)
    .bind(product_id)
    .bind(color)
    .bind(size)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Deactivate every row of a product; callers re-activate the defined set
pub async fn deactivate_all<'e, E>(executor: E, product_id: i64, now: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE product_variant SET is_active = 0, updated_at = ? WHERE product_id = ?")
        .bind(now)
        .bind(product_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Activate a combination, creating it with zero stock if it never existed
pub async fn activate<'e, E>(
    executor: E,
    product_id: i64,
    color: &str,
    size: &str,
    now: i64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO product_variant (product_id, color, size, stock_quantity, is_active, updated_at) VALUES (?1, ?2, ?3, 0, 1, ?4) ON CONFLICT (product_id, color, size) DO UPDATE SET is_active = 1, updated_at = excluded.updated_at",
    )
    .bind(product_id)
    .bind(color)
    .bind(size)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}
