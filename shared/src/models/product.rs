//! Product Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// color -> size -> quantity
///
/// Serialized form of the per-product `variants` snapshot column.
pub type VariantMap = BTreeMap<String, BTreeMap<String, i64>>;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    /// Price in cents
    pub price: i64,
    /// Aggregate stock (sum of all active variant quantities)
    pub stock_quantity: i64,
    /// Defined colors, in display order
    pub colors: Vec<String>,
    /// Defined sizes, in display order
    pub sizes: Vec<String>,
    /// Per-variant quantities (derived snapshot of `product_variant` rows)
    pub variants: VariantMap,
    pub low_stock_threshold: i64,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    /// A product sells variants only when both a color and a size list exist
    pub fn has_variant_definition(&self) -> bool {
        !self.colors.is_empty() && !self.sizes.is_empty()
    }

    pub fn is_sellable(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.low_stock_threshold
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub brand: Option<String>,
    /// Price in cents
    #[validate(range(min = 0, max = 1_000_000_000))]
    pub price: i64,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Initial quantities per color/size; combinations left out start at 0
    pub variants: Option<VariantMap>,
    /// Initial aggregate for products without color/size structure
    #[validate(range(min = 0, max = 1_000_000_000))]
    pub stock_quantity: Option<i64>,
    #[validate(range(min = 0))]
    pub low_stock_threshold: Option<i64>,
}

/// Update product payload
///
/// Stock is never changed through this payload; use a stock adjustment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0, max = 1_000_000_000))]
    pub price: Option<i64>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub low_stock_threshold: Option<i64>,
    pub is_active: Option<bool>,
}
