//! Product Repository

use super::RepoResult;
use shared::models::{Product, ProductCreate, ProductUpdate, VariantMap};
use sqlx::{Executor, Sqlite};

const PRODUCT_SELECT: &str = "SELECT id, name, category, brand, price, stock_quantity, colors, sizes, variants, low_stock_threshold, is_active, is_deleted, created_at, updated_at FROM product";

/// Raw `product` row
///
/// `colors`, `sizes` and `variants` are JSON text. `variants` may be missing
/// or unparsable on legacy rows, so it is kept raw and interpreted by the
/// inventory layout resolver.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub price: i64,
    pub stock_quantity: i64,
    pub colors: String,
    pub sizes: String,
    pub variants: Option<String>,
    pub low_stock_threshold: i64,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ProductRecord {
    pub fn color_list(&self) -> Vec<String> {
        parse_list(self.id, "colors", &self.colors)
    }

    pub fn size_list(&self) -> Vec<String> {
        parse_list(self.id, "sizes", &self.sizes)
    }

    pub fn is_sellable(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Build the API model with the given resolved variant map
    pub fn into_product(self, variants: VariantMap) -> Product {
        let colors = self.color_list();
        let sizes = self.size_list();
        Product {
            id: self.id,
            name: self.name,
            category: self.category,
            brand: self.brand,
            price: self.price,
            stock_quantity: self.stock_quantity,
            colors,
            sizes,
            variants,
            low_stock_threshold: self.low_stock_threshold,
            is_active: self.is_active,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn parse_list(product_id: i64, column: &str, raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(product_id, column, error = %e, "Unparsable product definition list, treating as empty");
        Vec::new()
    })
}

/// Serialize a color/size list for storage
pub fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<ProductRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ProductRecord>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// All products that are not soft-deleted
pub async fn find_all<'e, E>(executor: E) -> RepoResult<Vec<ProductRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{PRODUCT_SELECT} WHERE is_deleted = 0 ORDER BY category, name");
    let rows = sqlx::query_as::<_, ProductRecord>(&sql)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn insert<'e, E>(
    executor: E,
    id: i64,
    data: &ProductCreate,
    stock_quantity: i64,
    now: i64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO product (id, name, category, brand, price, stock_quantity, colors, sizes, variants, low_stock_threshold, is_active, is_deleted, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL, ?9, 1, 0, ?10, ?10)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.brand)
    .bind(data.price)
    .bind(stock_quantity)
    .bind(encode_list(&data.colors))
    .bind(encode_list(&data.sizes))
    .bind(data.low_stock_threshold.unwrap_or(5))
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

/// Update catalog fields; returns false when the product does not exist
pub async fn update<'e, E>(executor: E, id: i64, data: &ProductUpdate, now: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let colors = data.colors.as_deref().map(encode_list);
    let sizes = data.sizes.as_deref().map(encode_list);
    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?1, name), category = COALESCE(?2, category), brand = COALESCE(?3, brand), price = COALESCE(?4, price), colors = COALESCE(?5, colors), sizes = COALESCE(?6, sizes), low_stock_threshold = COALESCE(?7, low_stock_threshold), is_active = COALESCE(?8, is_active), updated_at = ?9 WHERE id = ?10 AND is_deleted = 0",
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.brand)
    .bind(data.price)
    .bind(colors)
    .bind(sizes)
    .bind(data.low_stock_threshold)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Soft delete: the product leaves sale eligibility, stock is untouched
pub async fn soft_delete<'e, E>(executor: E, id: i64, now: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE product SET is_deleted = 1, is_active = 0, updated_at = ? WHERE id = ? AND is_deleted = 0",
    )
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Bump `updated_at`; returns false when the product does not exist.
///
/// Issued as the first statement of a mutating transaction so the
/// connection holds SQLite's write lock before anything is read.
pub async fn touch<'e, E>(executor: E, id: i64, now: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE product SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Persist the recomputed aggregate and variant snapshot
pub async fn write_stock<'e, E>(
    executor: E,
    id: i64,
    stock_quantity: i64,
    variants: Option<&str>,
    now: i64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE product SET stock_quantity = ?1, variants = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(stock_quantity)
        .bind(variants)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Conditional aggregate decrement for products without variant structure.
///
/// Affects no row when fewer than `quantity` units are left.
pub async fn decrement_aggregate_if_available<'e, E>(
    executor: E,
    id: i64,
    quantity: i64,
    now: i64,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE product SET stock_quantity = MAX(0, stock_quantity - ?1), updated_at = ?2 WHERE id = ?3 AND stock_quantity >= ?1",
    )
    .bind(quantity)
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Overwrite the aggregate of a product without variant structure
pub async fn set_aggregate<'e, E>(executor: E, id: i64, quantity: i64, now: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE product SET stock_quantity = MAX(0, ?1), updated_at = ?2 WHERE id = ?3")
        .bind(quantity)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
