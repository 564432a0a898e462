//! Checkout Order Repository

use super::RepoResult;
use shared::models::{Order, OrderDetail, OrderItem};
use sqlx::{Executor, Sqlite, SqlitePool};

/// Order line to insert
#[derive(Debug, Clone)]
pub struct NewOrderItem<'a> {
    pub product_id: i64,
    pub product_name: &'a str,
    pub color: Option<&'a str>,
    pub size: Option<&'a str>,
    pub quantity: i64,
    pub unit_price: i64,
    pub line_total: i64,
}

pub async fn insert_order(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order: &Order,
    items: &[NewOrderItem<'_>],
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO customer_order (id, sale_id, customer_name, customer_email, total, item_count, status, created_by, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(&order.sale_id)
    .bind(&order.customer_name)
    .bind(&order.customer_email)
    .bind(order.total)
    .bind(order.item_count)
    .bind(&order.status)
    .bind(order.created_by)
    .bind(order.created_at)
    .execute(&mut **tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_item (order_id, product_id, product_name, color, size, quantity, unit_price, line_total) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id)
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

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, sale_id, customer_name, customer_email, total, item_count, status, created_by, created_at FROM customer_order WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(order) = order else {
        return Ok(None);
    };
    let items = find_items(pool, order.id).await?;
    Ok(Some(OrderDetail { order, items }))
}

pub async fn find_by_sale_id<'e, E>(executor: E, sale_id: &str) -> RepoResult<Option<Order>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, sale_id, customer_name, customer_email, total, item_count, status, created_by, created_at FROM customer_order WHERE sale_id = ?",
    )
    .bind(sale_id)
    .fetch_optional(executor)
    .await?;
    Ok(order)
}

async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, product_name, color, size, quantity, unit_price, line_total FROM order_item WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}
