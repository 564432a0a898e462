//! Stock Model
//!
//! Sale lines, shortfalls, adjustment commands and the stock movement ledger.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Largest quantity a single variant or aggregate may hold
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000_000;

/// One line of a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SaleLine {
    pub product_id: i64,
    /// Ignored for products without color/size structure
    #[serde(default)]
    pub color: String,
    /// Ignored for products without color/size structure
    #[serde(default)]
    pub size: String,
    #[validate(range(min = 1, max = 1_000_000_000))]
    pub quantity: i64,
}

impl SaleLine {
    pub fn new(product_id: i64, color: &str, size: &str, quantity: i64) -> Self {
        Self {
            product_id,
            color: color.to_string(),
            size: size.to_string(),
            quantity,
        }
    }
}

/// A line that cannot be served from current stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    pub product_id: i64,
    pub product_name: String,
    /// `None` for products without color/size structure
    pub color: Option<String>,
    pub size: Option<String>,
    pub requested: i64,
    pub available: i64,
}

impl StockShortfall {
    /// Buyer-facing message, e.g. "only 2 left in size 9, Black"
    pub fn message(&self) -> String {
        let left = if self.available == 0 {
            format!("{} is sold out", self.product_name)
        } else {
            format!("only {} left", self.available)
        };
        match (&self.color, &self.size) {
            (Some(color), Some(size)) => format!("{left} in size {size}, {color}"),
            _ => left,
        }
    }
}

/// Where a resolved variant quantity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockSource {
    /// Normalized `product_variant` row
    Row,
    /// Legacy `variants` snapshot entry of a product without rows
    Legacy,
    /// Even split of the unallocated aggregate
    Fallback,
}

/// Stock level of one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantLevel {
    pub product_id: i64,
    pub color: String,
    pub size: String,
    pub stock_quantity: i64,
}

/// Aggregate stock level of one product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateLevel {
    pub product_id: i64,
    pub stock_quantity: i64,
}

/// Result of a committed sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleOutcome {
    pub sale_id: String,
    pub updated_variants: Vec<VariantLevel>,
    pub updated_aggregates: Vec<AggregateLevel>,
}

/// One resolved entry of a product's stock map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    pub color: String,
    pub size: String,
    pub stock_quantity: i64,
    pub source: StockSource,
}

/// Full stock picture of one product, as reads see it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevels {
    pub product_id: i64,
    pub stock_quantity: i64,
    pub low_stock: bool,
    pub variants: Vec<ResolvedVariant>,
}

/// Admin stock change command: `{"set": n}` or `{"delta": n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAdjustment {
    /// Absolute quantity (must be >= 0)
    Set(i64),
    /// Relative change; decreases are floored at 0
    Delta(i64),
}

impl StockAdjustment {
    /// Quantity after applying this adjustment to `current`
    pub fn apply(self, current: i64) -> i64 {
        match self {
            Self::Set(n) => n.max(0),
            Self::Delta(d) => current.saturating_add(d).max(0),
        }
    }

    /// Whether the command stays within [`MAX_STOCK_QUANTITY`]
    pub fn is_within_bounds(self) -> bool {
        match self {
            Self::Set(n) => (0..=MAX_STOCK_QUANTITY).contains(&n),
            Self::Delta(d) => (-MAX_STOCK_QUANTITY..=MAX_STOCK_QUANTITY).contains(&d),
        }
    }
}

/// Adjust stock request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustStockRequest {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    pub adjustment: StockAdjustment,
}

/// Adjust stock response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustStockResponse {
    pub product_id: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub stock_quantity: i64,
    pub aggregate: i64,
}

/// Sale channel that consumed stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleChannel {
    Checkout,
    Pos,
    Direct,
}

impl SaleChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkout => "CHECKOUT",
            Self::Pos => "POS",
            Self::Direct => "DIRECT",
        }
    }
}

/// Why a stock movement happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementReason {
    Sale,
    Adjustment,
    Reconcile,
}

impl MovementReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Adjustment => "ADJUSTMENT",
            Self::Reconcile => "RECONCILE",
        }
    }
}

/// Stock movement ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockMovement {
    pub id: i64,
    pub product_id: i64,
    /// `None` for aggregate-level movements
    pub color: Option<String>,
    pub size: Option<String>,
    pub delta: i64,
    pub quantity_after: i64,
    /// SALE / ADJUSTMENT / RECONCILE
    pub reason: String,
    /// Sale id or operator
    pub reference: Option<String>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortfall(color: Option<&str>, size: Option<&str>, available: i64) -> StockShortfall {
        StockShortfall {
            product_id: 1,
            product_name: "Runner".into(),
            color: color.map(String::from),
            size: size.map(String::from),
            requested: 3,
            available,
        }
    }

    #[test]
    fn shortfall_message_names_size_and_color() {
        assert_eq!(
            shortfall(Some("Black"), Some("9"), 2).message(),
            "only 2 left in size 9, Black"
        );
        assert_eq!(shortfall(None, None, 1).message(), "only 1 left");
        assert_eq!(
            shortfall(Some("Black"), Some("9"), 0).message(),
            "Runner is sold out in size 9, Black"
        );
    }

    #[test]
    fn adjustment_serde_shape() {
        let set: StockAdjustment = serde_json::from_str(r#"{"set":10}"#).unwrap();
        assert_eq!(set, StockAdjustment::Set(10));
        let delta: StockAdjustment = serde_json::from_str(r#"{"delta":-4}"#).unwrap();
        assert_eq!(delta, StockAdjustment::Delta(-4));
    }

    #[test]
    fn adjustment_apply_floors_at_zero() {
        assert_eq!(StockAdjustment::Set(10).apply(3), 10);
        assert_eq!(StockAdjustment::Delta(5).apply(3), 8);
        assert_eq!(StockAdjustment::Delta(-5).apply(3), 0);
        assert_eq!(StockAdjustment::Set(-1).apply(3), 0);
    }

    #[test]
    fn sale_line_quantity_must_be_positive() {
        assert!(SaleLine::new(1, "Black", "9", 0).validate().is_err());
        assert!(SaleLine::new(1, "Black", "9", 1).validate().is_ok());
        assert!(SaleLine::new(1, "Black", "9", MAX_STOCK_QUANTITY + 1).validate().is_err());
    }

    #[test]
    fn adjustment_bounds() {
        assert!(StockAdjustment::Set(MAX_STOCK_QUANTITY).is_within_bounds());
        assert!(StockAdjustment::Delta(-MAX_STOCK_QUANTITY).is_within_bounds());
        assert!(!StockAdjustment::Set(i64::MAX).is_within_bounds());
        assert!(!StockAdjustment::Set(-1).is_within_bounds());
        assert!(!StockAdjustment::Delta(i64::MIN).is_within_bounds());
    }
}
