//! Product Variant Model

use serde::{Deserialize, Serialize};

/// Normalized per-variant stock row (`product_variant`)
///
/// Rows are the authoritative stock record; the product's `variants`
/// snapshot and `stock_quantity` are rebuilt from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub product_id: i64,
    pub color: String,
    pub size: String,
    pub stock_quantity: i64,
    pub is_active: bool,
    pub updated_at: i64,
}
