//! POS Transaction Model

use super::stock::SaleLine;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// POS transaction header (`pos_transaction`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PosTransaction {
    pub id: i64,
    pub sale_id: String,
    pub cashier_id: i64,
    pub cashier_name: String,
    pub payment_method: String,
    /// Total in cents
    pub total: i64,
    pub item_count: i64,
    /// Business date (YYYY-MM-DD)
    pub business_date: String,
    pub created_at: i64,
}

/// POS transaction line (`pos_transaction_item`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PosTransactionItem {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: i64,
    /// Unit price in cents
    pub unit_price: i64,
    pub line_total: i64,
}

/// POS transaction with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosTransactionDetail {
    #[serde(flatten)]
    pub transaction: PosTransaction,
    pub items: Vec<PosTransactionItem>,
}

/// Finalize POS sale request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PosSaleRequest {
    #[validate(length(min = 1, max = 64))]
    pub sale_id: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub payment_method: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<SaleLine>,
}

/// Daily sales aggregate (`daily_sales`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DailySales {
    /// Business date (YYYY-MM-DD)
    pub business_date: String,
    pub transaction_count: i64,
    pub units_sold: i64,
    /// Revenue in cents
    pub revenue: i64,
    pub updated_at: i64,
}
