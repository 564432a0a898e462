//! Checkout Order Model

use super::stock::SaleLine;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer order header (`customer_order`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Sale id the stock was reserved under
    pub sale_id: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    /// Total in cents
    pub total: i64,
    pub item_count: i64,
    pub status: String,
    /// Placing user id
    pub created_by: Option<i64>,
    pub created_at: i64,
}

/// Order line (`order_item`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Product name at time of sale
    pub product_name: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: i64,
    /// Unit price in cents at time of sale
    pub unit_price: i64,
    pub line_total: i64,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Checkout request: the buyer's cart
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutRequest {
    /// Client-generated idempotency key; generated server-side when absent
    #[validate(length(min = 1, max = 64))]
    pub sale_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(min = 1), nested)]
    pub items: Vec<SaleLine>,
}
