//! Stock Sale Repository
//!
//! One `stock_sale` row per committed sale id.

use super::RepoResult;
use shared::models::SaleChannel;
use sqlx::{Executor, Sqlite};

/// Claim a sale id. Fails with `RepoError::Duplicate` when it was already used.
pub async fn claim<'e, E>(executor: E, sale_id: &str, channel: SaleChannel, now: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO stock_sale (sale_id, channel, created_at) VALUES (?, ?, ?)")
        .bind(sale_id)
        .bind(channel.as_str())
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn exists<'e, E>(executor: E, sale_id: &str) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM stock_sale WHERE sale_id = ?")
        .bind(sale_id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}
