//! POS Transaction Repository

use super::RepoResult;
use shared::models::{DailySales, PosTransaction, PosTransactionDetail, PosTransactionItem};
use sqlx::{Executor, Sqlite, SqlitePool};

/// Transaction line to insert
#[derive(Debug, Clone)]
pub struct NewPosItem<'a> {
    pub product_id: i64,
    pub product_name: &'a str,
    pub color: Option<&'a str>,
    pub size: Option<&'a str>,
    pub quantity: i64,
    pub unit_price: i64,
    pub line_total: i64,
}

const TRANSACTION_SELECT: &str = "SELECT id, sale_id, cashier_id, cashier_name, payment_method, total, item_count, business_date, created_at FROM pos_transaction";

pub async fn insert_transaction(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    transaction: &PosTransaction,
    items: &[NewPosItem<'_>],
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO pos_transaction (id, sale_id, cashier_id, cashier_name, payment_method, total, item_count, business_date, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(transaction.id)
    .bind(&transaction.sale_id)
    .bind(transaction.cashier_id)
    .bind(&transaction.cashier_name)
    .bind(&transaction.payment_method)
    .bind(transaction.total)
    .bind(transaction.item_count)
    .bind(&transaction.business_date)
    .bind(transaction.created_at)
    .execute(&mut **tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO pos_transaction_item (transaction_id, product_id, product_name, color, size, quantity, unit_price, line_total) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(transaction.id)
        .bind(item.product_id)
        .bind(item.product_name)
        .bind(item.color)
        .bind(item.size)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.line_total)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Add one transaction to the business day's totals
pub async fn add_to_daily_sales<'e, E>(
    executor: E,
    business_date: &str,
    units: i64,
    revenue: i64,
    now: i64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO daily_sales (business_date, transaction_count, units_sold, revenue, updated_at) VALUES (?1, 1, ?2, ?3, ?4) ON CONFLICT (business_date) DO UPDATE SET transaction_count = transaction_count + 1, units_sold = units_sold + excluded.units_sold, revenue = revenue + excluded.revenue, updated_at = excluded.updated_at",
    )
    .bind(business_date)
    .bind(units)
    .bind(revenue)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PosTransactionDetail>> {
    let sql = format!("{TRANSACTION_SELECT} WHERE id = ?");
    let transaction = sqlx::query_as::<_, PosTransaction>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(transaction) = transaction else {
        return Ok(None);
    };
    let items = sqlx::query_as::<_, PosTransactionItem>(
        "SELECT id, transaction_id, product_id, product_name, color, size, quantity, unit_price, line_total FROM pos_transaction_item WHERE transaction_id = ? ORDER BY id",
    )
    .bind(transaction.id)
    .fetch_all(pool)
    .await?;
    Ok(Some(PosTransactionDetail { transaction, items }))
}

pub async fn find_by_sale_id<'e, E>(executor: E, sale_id: &str) -> RepoResult<Option<PosTransaction>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{TRANSACTION_SELECT} WHERE sale_id = ?");
    let row = sqlx::query_as::<_, PosTransaction>(&sql)
        .bind(sale_id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn find_daily_sales<'e, E>(executor: E, business_date: &str) -> RepoResult<Option<DailySales>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, DailySales>(
        "SELECT business_date, transaction_count, units_sold, revenue, updated_at FROM daily_sales WHERE business_date = ?",
    )
    .bind(business_date)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}
