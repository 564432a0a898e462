//! Inventory core
//!
//! [`StockService`] is the single entry point for stock reads and writes.
//! Every mutation (sale, adjustment, catalog change) runs as one SQLite
//! transaction whose first statement is a write, so concurrent writers
//! serialize on the database lock instead of racing on stale reads.
//!
//! Modules:
//! - [`layout`]: pure resolution of rows / legacy snapshot / fallback
//! - [`store`]: loading and materialization
//! - [`aggregator`]: aggregate and snapshot recomputation
//! - [`engine`]: all-or-nothing multi-line sales
//! - [`adjustment`]: admin set/delta and reconciliation
//! - [`catalog`]: product CRUD

pub mod adjustment;
pub mod aggregator;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod layout;
pub mod retry;
pub mod store;

use std::future::Future;

use shared::models::{
    AdjustStockResponse, Product, ProductCreate, ProductUpdate, SaleChannel, SaleLine,
    SaleOutcome, StockAdjustment, StockLevels, StockMovement,
};
use sqlx::SqlitePool;

use crate::db::repository::movement;

pub use aggregator::Aggregation;
pub use engine::{CommittedLine, CommittedSale, NoRecord, SaleRecorder};
pub use error::{StockError, StockResult};
pub use layout::FallbackPolicy;
pub use retry::RetryPolicy;

/// Stock service
#[derive(Clone, Debug)]
pub struct StockService {
    pool: SqlitePool,
    policy: FallbackPolicy,
    retry: RetryPolicy,
}

impl StockService {
    pub fn new(pool: SqlitePool, policy: FallbackPolicy, retry: RetryPolicy) -> Self {
        Self {
            pool,
            policy,
            retry,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Run `op` until it succeeds, fails for a non-retryable reason, or the
    /// retry budget is spent
    async fn with_retry<T, F, Fut>(&self, operation: &str, mut op: F) -> StockResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = StockResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Err(e) if e.is_retryable() && self.retry.should_retry(attempt) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Stock write conflicted, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) if e.is_retryable() => {
                    tracing::error!(operation, attempt, "Stock write conflict persisted, giving up");
                    return Err(e);
                }
                other => return other,
            }
        }
    }

    // ========================================================================
    // Sales
    // ========================================================================

    /// Decrement stock for every line or for none of them
    pub async fn reserve_and_decrement(
        &self,
        sale_id: &str,
        lines: &[SaleLine],
    ) -> StockResult<SaleOutcome> {
        let (outcome, ()) = self
            .reserve_with(sale_id, SaleChannel::Direct, lines, &NoRecord)
            .await?;
        Ok(outcome)
    }

    /// Like [`Self::reserve_and_decrement`], with a channel recorder writing
    /// its own rows in the same transaction
    pub async fn reserve_with<R: SaleRecorder>(
        &self,
        sale_id: &str,
        channel: SaleChannel,
        lines: &[SaleLine],
        recorder: &R,
    ) -> StockResult<(SaleOutcome, R::Output)> {
        let lines = engine::normalize_lines(sale_id, lines)?;
        let sale_id = sale_id.trim();
        let result = self
            .with_retry("sale", || {
                engine::reserve_and_decrement(
                    &self.pool,
                    self.policy,
                    sale_id,
                    channel,
                    &lines,
                    recorder,
                )
            })
            .await;

        if let Err(e) = &result {
            tracing::info!(sale_id, channel = channel.as_str(), error = %e, "Sale rejected");
        }
        result
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Sellable quantity of one variant (aggregate for products without
    /// color/size structure)
    pub async fn get_available_stock(&self, product_id: i64, color: &str, size: &str) -> StockResult<i64> {
        let mut conn = self.pool.acquire().await?;
        let stock = store::load(&mut conn, product_id, self.policy).await?;
        stock.layout.available(color, size)
    }

    pub async fn get_aggregate_stock(&self, product_id: i64) -> StockResult<i64> {
        let mut conn = self.pool.acquire().await?;
        let stock = store::load(&mut conn, product_id, self.policy).await?;
        stock.layout.total()
    }

    /// Every resolved variant of a product with its source
    pub async fn stock_levels(&self, product_id: i64) -> StockResult<StockLevels> {
        let mut conn = self.pool.acquire().await?;
        let stock = store::load(&mut conn, product_id, self.policy).await?;
        let stock_quantity = stock.layout.total()?;
        Ok(StockLevels {
            product_id,
            stock_quantity,
            low_stock: stock_quantity <= stock.record.low_stock_threshold,
            variants: stock.layout.entries().to_vec(),
        })
    }

    /// Ledger entries of a product, newest first
    pub async fn movements(&self, product_id: i64, limit: i64) -> StockResult<Vec<StockMovement>> {
        let mut conn = self.pool.acquire().await?;
        store::load(&mut conn, product_id, self.policy).await?;
        Ok(movement::find_by_product(&mut *conn, product_id, limit.clamp(1, 500)).await?)
    }

    // ========================================================================
    // Adjustments
    // ========================================================================

    pub async fn adjust(
        &self,
        product_id: i64,
        color: &str,
        size: &str,
        adjustment: StockAdjustment,
        reference: Option<&str>,
    ) -> StockResult<AdjustStockResponse> {
        self.with_retry("adjust", || {
            adjustment::adjust(
                &self.pool,
                self.policy,
                product_id,
                color,
                size,
                adjustment,
                reference,
            )
        })
        .await
    }

    /// Apply an adjustment and return the variant's new quantity
    pub async fn adjust_stock(
        &self,
        product_id: i64,
        color: &str,
        size: &str,
        adjustment: StockAdjustment,
    ) -> StockResult<i64> {
        let response = self.adjust(product_id, color, size, adjustment, None).await?;
        Ok(response.stock_quantity)
    }

    pub async fn set_variant_stock(&self, product_id: i64, color: &str, size: &str, quantity: i64) -> StockResult<i64> {
        self.adjust_stock(product_id, color, size, StockAdjustment::Set(quantity))
            .await
    }

    pub async fn increment_variant_stock(&self, product_id: i64, color: &str, size: &str, by: i64) -> StockResult<i64> {
        if by < 0 {
            return Err(StockError::invalid("increment must not be negative"));
        }
        self.adjust_stock(product_id, color, size, StockAdjustment::Delta(by))
            .await
    }

    /// Unconditional decrement floored at 0; sales go through
    /// [`Self::reserve_and_decrement`] instead
    pub async fn decrement_variant_stock(&self, product_id: i64, color: &str, size: &str, by: i64) -> StockResult<i64> {
        if by < 0 {
            return Err(StockError::invalid("decrement must not be negative"));
        }
        self.adjust_stock(product_id, color, size, StockAdjustment::Delta(-by))
            .await
    }

    /// Rebuild the aggregate from variant rows
    pub async fn reconcile(&self, product_id: i64) -> StockResult<Aggregation> {
        self.with_retry("reconcile", || {
            adjustment::reconcile(&self.pool, self.policy, product_id)
        })
        .await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn create_product(&self, data: &ProductCreate) -> StockResult<Product> {
        self.with_retry("create_product", || catalog::create(&self.pool, self.policy, data))
            .await
    }

    pub async fn update_product(&self, id: i64, data: &ProductUpdate) -> StockResult<Product> {
        self.with_retry("update_product", || {
            catalog::update(&self.pool, self.policy, id, data)
        })
        .await
    }

    pub async fn delete_product(&self, id: i64) -> StockResult<()> {
        catalog::delete(&self.pool, id).await
    }

    pub async fn get_product(&self, id: i64) -> StockResult<Product> {
        catalog::get(&self.pool, self.policy, id).await
    }

    pub async fn list_products(&self) -> StockResult<Vec<Product>> {
        catalog::list(&self.pool, self.policy).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{MAX_STOCK_QUANTITY, StockSource, VariantMap};

    async fn service() -> StockService {
        let db = DbService::in_memory().await.unwrap();
        StockService::new(db.pool, FallbackPolicy::EvenSplit, RetryPolicy::default())
    }

    fn shoe(variants: &[(&str, &str, i64)]) -> ProductCreate {
        let mut map = VariantMap::new();
        for (color, size, quantity) in variants {
            map.entry(color.to_string())
                .or_default()
                .insert(size.to_string(), *quantity);
        }
        ProductCreate {
            name: "Trail Runner".into(),
            category: "shoes".into(),
            brand: Some("Acme".into()),
            price: 8900,
            colors: vec!["Black".into(), "White".into()],
            sizes: vec!["9".into(), "10".into()],
            variants: Some(map),
            stock_quantity: None,
            low_stock_threshold: Some(2),
        }
    }

    fn laces(stock: i64) -> ProductCreate {
        ProductCreate {
            name: "Laces".into(),
            category: "accessories".into(),
            brand: None,
            price: 300,
            colors: vec![],
            sizes: vec![],
            variants: None,
            stock_quantity: Some(stock),
            low_stock_threshold: None,
        }
    }

    async fn seed_legacy(svc: &StockService, id: i64, stock: i64, variants: Option<&str>) {
        sqlx::query(
            "INSERT INTO product (id, name, category, price, stock_quantity, colors, sizes, variants, created_at, updated_at) VALUES (?, 'Legacy Runner', 'shoes', 7900, ?, '[\"Black\",\"White\"]', '[\"8\",\"9\"]', ?, 0, 0)",
        )
        .bind(id)
        .bind(stock)
        .bind(variants)
        .execute(svc.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn create_product_seeds_rows_and_aggregate() {
        let svc = service().await;
        let product = svc
            .create_product(&shoe(&[("Black", "9", 2), ("Black", "10", 1)]))
            .await
            .unwrap();

        assert_eq!(product.stock_quantity, 3);
        assert_eq!(product.variants["Black"]["9"], 2);
        assert_eq!(product.variants["White"]["10"], 0);
        assert_eq!(svc.get_available_stock(product.id, "White", "9").await.unwrap(), 0);

        let movements = svc.movements(product.id, 10).await.unwrap();
        assert_eq!(movements.len(), 2);
        assert!(movements.iter().all(|m| m.reason == "ADJUSTMENT"));
    }

    #[tokio::test]
    async fn create_rejects_aggregate_for_structured_product() {
        let svc = service().await;
        let mut payload = shoe(&[]);
        payload.stock_quantity = Some(10);

        let err = svc.create_product(&payload).await.unwrap_err();
        assert!(matches!(err, StockError::InvalidDefinition(_)));
    }

    #[tokio::test]
    async fn sale_decrements_only_the_sold_variant() {
        let svc = service().await;
        let product = svc
            .create_product(&shoe(&[("Black", "9", 2), ("Black", "10", 1)]))
            .await
            .unwrap();

        let outcome = svc
            .reserve_and_decrement("sale-1", &[SaleLine::new(product.id, "Black", "9", 2)])
            .await
            .unwrap();

        assert_eq!(outcome.updated_variants[0].stock_quantity, 0);
        assert_eq!(outcome.updated_aggregates[0].stock_quantity, 1);
        assert_eq!(svc.get_available_stock(product.id, "Black", "10").await.unwrap(), 1);
        assert_eq!(svc.get_aggregate_stock(product.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn shortfall_lists_every_line_and_changes_nothing() {
        let svc = service().await;
        let shoe = svc
            .create_product(&shoe(&[("Black", "9", 2), ("White", "10", 1)]))
            .await
            .unwrap();
        let laces = svc.create_product(&laces(1)).await.unwrap();

        let err = svc
            .reserve_and_decrement(
                "sale-short",
                &[
                    SaleLine::new(shoe.id, "Black", "9", 3),
                    SaleLine::new(shoe.id, "White", "10", 1),
                    SaleLine::new(laces.id, "", "", 2),
                ],
            )
            .await
            .unwrap_err();

        let StockError::InsufficientStock(shortfalls) = err else {
            panic!("expected InsufficientStock, got {err:?}");
        };
        assert_eq!(shortfalls.len(), 2);
        assert_eq!(shortfalls[0].message(), "only 2 left in size 9, Black");
        assert_eq!(shortfalls[1].color, None);
        assert_eq!(shortfalls[1].message(), "only 1 left");

        assert_eq!(svc.get_available_stock(shoe.id, "White", "10").await.unwrap(), 1);
        assert_eq!(svc.get_aggregate_stock(laces.id).await.unwrap(), 1);
        // The sale id was never claimed, so it can be reused
        svc.reserve_and_decrement("sale-short", &[SaleLine::new(laces.id, "", "", 1)])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn repeated_lines_are_checked_together() {
        let svc = service().await;
        let product = svc
            .create_product(&shoe(&[("Black", "9", 2)]))
            .await
            .unwrap();

        let err = svc
            .reserve_and_decrement(
                "sale-dup-lines",
                &[
                    SaleLine::new(product.id, "Black", "9", 2),
                    SaleLine::new(product.id, "Black", "9", 1),
                ],
            )
            .await
            .unwrap_err();
        let StockError::InsufficientStock(shortfalls) = err else {
            panic!("expected InsufficientStock");
        };
        assert_eq!(shortfalls[0].requested, 3);
    }

    #[tokio::test]
    async fn reused_sale_id_is_rejected() {
        let svc = service().await;
        let product = svc.create_product(&laces(5)).await.unwrap();
        let lines = [SaleLine::new(product.id, "", "", 1)];

        svc.reserve_and_decrement("sale-once", &lines).await.unwrap();
        let err = svc.reserve_and_decrement("sale-once", &lines).await.unwrap_err();

        assert!(matches!(err, StockError::DuplicateSale(_)));
        assert_eq!(svc.get_aggregate_stock(product.id).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn unknown_and_unavailable_products_are_rejected() {
        let svc = service().await;
        let product = svc.create_product(&shoe(&[("Black", "9", 2)])).await.unwrap();

        let err = svc
            .reserve_and_decrement("s1", &[SaleLine::new(404, "Black", "9", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::NotFound(404)));

        let err = svc
            .reserve_and_decrement("s2", &[SaleLine::new(product.id, "Green", "9", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::UnknownVariant { .. }));

        svc.delete_product(product.id).await.unwrap();
        let err = svc
            .reserve_and_decrement("s3", &[SaleLine::new(product.id, "Black", "9", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::Unavailable(_)));
    }

    #[tokio::test]
    async fn legacy_product_is_materialized_by_first_sale() {
        let svc = service().await;
        seed_legacy(&svc, 7, 20, None).await;

        let levels = svc.stock_levels(7).await.unwrap();
        assert!(levels.variants.iter().all(|v| v.source == StockSource::Fallback));
        assert_eq!(svc.get_available_stock(7, "White", "8").await.unwrap(), 5);

        svc.reserve_and_decrement("legacy-1", &[SaleLine::new(7, "Black", "8", 2)])
            .await
            .unwrap();

        let levels = svc.stock_levels(7).await.unwrap();
        assert!(levels.variants.iter().all(|v| v.source == StockSource::Row));
        assert_eq!(svc.get_available_stock(7, "Black", "8").await.unwrap(), 3);
        assert_eq!(svc.get_available_stock(7, "White", "9").await.unwrap(), 5);
        assert_eq!(levels.stock_quantity, 18);
    }

    #[tokio::test]
    async fn corrupt_snapshot_heals_on_first_mutation() {
        let svc = service().await;
        seed_legacy(&svc, 8, 8, Some("{not json")).await;

        assert_eq!(svc.get_available_stock(8, "Black", "8").await.unwrap(), 2);

        let updated = svc.increment_variant_stock(8, "Black", "8", 3).await.unwrap();
        assert_eq!(updated, 5);

        let record = crate::db::repository::product::find_by_id(svc.pool(), 8)
            .await
            .unwrap()
            .unwrap();
        let snapshot: VariantMap = serde_json::from_str(record.variants.as_deref().unwrap()).unwrap();
        assert_eq!(snapshot["Black"]["8"], 5);
        assert_eq!(record.stock_quantity, 11);
    }

    #[tokio::test]
    async fn adjustments_set_and_floor_at_zero() {
        let svc = service().await;
        let product = svc.create_product(&shoe(&[("Black", "9", 2)])).await.unwrap();

        assert_eq!(svc.set_variant_stock(product.id, "White", "10", 10).await.unwrap(), 10);
        assert_eq!(svc.decrement_variant_stock(product.id, "Black", "9", 5).await.unwrap(), 0);
        assert_eq!(svc.get_aggregate_stock(product.id).await.unwrap(), 10);

        let err = svc
            .adjust_stock(product.id, "Black", "9", StockAdjustment::Set(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::Invalid(_)));

        let err = svc
            .set_variant_stock(product.id, "Green", "9", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::UnknownVariant { .. }));
    }

    #[tokio::test]
    async fn aggregate_only_product_adjusts_its_aggregate() {
        let svc = service().await;
        let product = svc.create_product(&laces(4)).await.unwrap();

        let response = svc
            .adjust(product.id, "", "", StockAdjustment::Delta(6), Some("admin"))
            .await
            .unwrap();
        assert_eq!(response.aggregate, 10);
        assert!(response.color.is_none());
        assert_eq!(svc.get_available_stock(product.id, "any", "thing").await.unwrap(), 10);
    }

    #[tokio::test]
    async fn reconcile_repairs_drifted_aggregate() {
        let svc = service().await;
        let product = svc.create_product(&shoe(&[("Black", "9", 2)])).await.unwrap();
        sqlx::query("UPDATE product SET stock_quantity = 40 WHERE id = ?")
            .bind(product.id)
            .execute(svc.pool())
            .await
            .unwrap();

        let agg = svc.reconcile(product.id).await.unwrap();
        assert_eq!(agg.previous, 40);
        assert_eq!(agg.stock_quantity, 2);

        let movements = svc.movements(product.id, 1).await.unwrap();
        assert_eq!(movements[0].reason, "RECONCILE");
        assert_eq!(movements[0].delta, -38);
    }

    #[tokio::test]
    async fn removed_combination_leaves_the_aggregate() {
        let svc = service().await;
        let product = svc
            .create_product(&shoe(&[("Black", "9", 2), ("White", "9", 3)]))
            .await
            .unwrap();

        let updated = svc
            .update_product(
                product.id,
                &ProductUpdate {
                    colors: Some(vec!["Black".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.stock_quantity, 2);
        assert!(!updated.variants.contains_key("White"));
        let err = svc.get_available_stock(product.id, "White", "9").await.unwrap_err();
        assert!(matches!(err, StockError::UnknownVariant { .. }));

        // Re-adding the color brings the retired row back with its quantity
        let restored = svc
            .update_product(
                product.id,
                &ProductUpdate {
                    colors: Some(vec!["Black".into(), "White".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(restored.stock_quantity, 5);
    }

    #[tokio::test]
    async fn clearing_variant_structure_is_rejected() {
        let svc = service().await;
        let product = svc
            .create_product(&shoe(&[("Black", "9", 2), ("White", "9", 3)]))
            .await
            .unwrap();

        for update in [
            ProductUpdate {
                colors: Some(vec![]),
                ..Default::default()
            },
            ProductUpdate {
                sizes: Some(vec![]),
                ..Default::default()
            },
        ] {
            let err = svc.update_product(product.id, &update).await.unwrap_err();
            assert!(matches!(err, StockError::InvalidDefinition(_)));
        }

        // Still sold per variant, never from the aggregate
        assert_eq!(svc.get_aggregate_stock(product.id).await.unwrap(), 5);
        let err = svc
            .reserve_and_decrement("clear-1", &[SaleLine::new(product.id, "", "", 5)])
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::UnknownVariant { .. }));

        svc.reserve_and_decrement("clear-2", &[SaleLine::new(product.id, "White", "9", 3)])
            .await
            .unwrap();
        let restated = svc
            .update_product(
                product.id,
                &ProductUpdate {
                    colors: Some(vec!["Black".into(), "White".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(restated.stock_quantity, 2);
        assert_eq!(restated.variants["White"]["9"], 0);
    }

    #[tokio::test]
    async fn oversized_quantities_are_rejected() {
        let svc = service().await;
        let product = svc.create_product(&shoe(&[("Black", "9", 2)])).await.unwrap();

        let err = svc
            .set_variant_stock(product.id, "Black", "9", i64::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::Invalid(_)));
        let err = svc
            .increment_variant_stock(product.id, "Black", "9", i64::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::Invalid(_)));

        svc.set_variant_stock(product.id, "White", "9", MAX_STOCK_QUANTITY)
            .await
            .unwrap();
        let err = svc
            .increment_variant_stock(product.id, "White", "9", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::Invalid(_)));

        assert_eq!(
            svc.get_aggregate_stock(product.id).await.unwrap(),
            MAX_STOCK_QUANTITY + 2
        );
        assert_eq!(svc.get_available_stock(product.id, "Black", "9").await.unwrap(), 2);

        let mut payload = shoe(&[("Black", "9", MAX_STOCK_QUANTITY + 1)]);
        payload.name = "Too Many".into();
        let err = svc.create_product(&payload).await.unwrap_err();
        assert!(matches!(err, StockError::InvalidDefinition(_)));
    }

    #[tokio::test]
    async fn uneven_legacy_split_is_ledgered_once() {
        let svc = service().await;
        seed_legacy(&svc, 9, 21, None).await;

        assert_eq!(svc.increment_variant_stock(9, "Black", "8", 1).await.unwrap(), 6);
        assert_eq!(svc.get_aggregate_stock(9).await.unwrap(), 21);

        let movements = svc.movements(9, 10).await.unwrap();
        assert_eq!(movements.len(), 2);
        let reconcile = movements.iter().find(|m| m.reason == "RECONCILE").unwrap();
        assert_eq!(reconcile.delta, -1);
        assert_eq!(reconcile.quantity_after, 20);
        let net: i64 = movements.iter().map(|m| m.delta).sum();
        assert_eq!(net, 0);

        // Nothing left unexplained
        let agg = svc.reconcile(9).await.unwrap();
        assert_eq!(agg.drift(), 0);
        assert_eq!(svc.movements(9, 10).await.unwrap().len(), 2);

        seed_legacy(&svc, 10, 21, None).await;
        let agg = svc.reconcile(10).await.unwrap();
        assert_eq!(agg.previous, 21);
        assert_eq!(agg.stock_quantity, 20);
        let movements = svc.movements(10, 10).await.unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].delta, -1);
    }

    #[tokio::test]
    async fn list_hides_deleted_products() {
        let svc = service().await;
        let keep = svc.create_product(&laces(1)).await.unwrap();
        let gone = svc.create_product(&laces(2)).await.unwrap();
        svc.delete_product(gone.id).await.unwrap();

        let products = svc.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, keep.id);
        assert!(matches!(
            svc.get_product(gone.id).await.unwrap_err(),
            StockError::NotFound(_)
        ));
    }
}
