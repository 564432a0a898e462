//! POS transaction flow
//!
//! Same engine contract as checkout. The recorder writes the transaction
//! audit rows and bumps the business day's `daily_sales` totals.

use shared::models::{DailySales, PosSaleRequest, PosTransaction, PosTransactionDetail, SaleChannel};
use sqlx::{Sqlite, Transaction};

use crate::db::repository::pos::{self, NewPosItem};
use crate::inventory::{CommittedSale, SaleRecorder, StockError, StockResult, StockService};

use super::sale_id_or_new;

/// Writes `pos_transaction` + `pos_transaction_item` and updates `daily_sales`
#[derive(Debug, Clone)]
pub struct PosRecorder<'a> {
    pub cashier_id: i64,
    pub cashier_name: &'a str,
    pub payment_method: &'a str,
}

impl SaleRecorder for PosRecorder<'_> {
    /// Transaction id
    type Output = i64;

    async fn record(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        sale: &CommittedSale,
    ) -> StockResult<i64> {
        let business_date = shared::util::business_date(sale.now);
        let transaction = PosTransaction {
            id: shared::util::snowflake_id(),
            sale_id: sale.sale_id.clone(),
            cashier_id: self.cashier_id,
            cashier_name: self.cashier_name.to_string(),
            payment_method: self.payment_method.to_string(),
            total: sale.total()?,
            item_count: sale.item_count()?,
            business_date: business_date.clone(),
            created_at: sale.now,
        };
        let items: Vec<NewPosItem<'_>> = sale
            .lines
            .iter()
            .map(|l| {
                Ok(NewPosItem {
                    product_id: l.product_id,
                    product_name: &l.product_name,
                    color: l.color.as_deref(),
                    size: l.size.as_deref(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                    line_total: l.line_total()?,
                })
            })
            .collect::<StockResult<_>>()?;

        pos::insert_transaction(tx, &transaction, &items).await?;
        pos::add_to_daily_sales(
            &mut **tx,
            &business_date,
            transaction.item_count,
            transaction.total,
            sale.now,
        )
        .await?;
        Ok(transaction.id)
    }
}

/// Finalize a cashier's sale
pub async fn finalize_sale(
    stock: &StockService,
    req: &PosSaleRequest,
    cashier_id: i64,
    cashier_name: &str,
) -> StockResult<PosTransactionDetail> {
    let sale_id = sale_id_or_new(req.sale_id.as_deref());
    let recorder = PosRecorder {
        cashier_id,
        cashier_name,
        payment_method: &req.payment_method,
    };

    let (_, transaction_id) = stock
        .reserve_with(&sale_id, SaleChannel::Pos, &req.items, &recorder)
        .await?;

    tracing::info!(transaction_id, cashier_id, sale_id = %sale_id, "POS sale finalized");
    pos::find_by_id(stock.pool(), transaction_id)
        .await?
        .ok_or_else(|| {
            StockError::Database(format!("transaction {transaction_id} missing after commit"))
        })
}

pub async fn find_transaction(stock: &StockService, id: i64) -> StockResult<Option<PosTransactionDetail>> {
    Ok(pos::find_by_id(stock.pool(), id).await?)
}

pub async fn daily_sales(stock: &StockService, business_date: &str) -> StockResult<Option<DailySales>> {
    Ok(pos::find_daily_sales(stock.pool(), business_date).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::inventory::{FallbackPolicy, RetryPolicy};
    use shared::models::{ProductCreate, SaleLine};

    async fn service_with_laces(stock: i64) -> (StockService, i64) {
        let db = DbService::in_memory().await.unwrap();
        let svc = StockService::new(db.pool, FallbackPolicy::EvenSplit, RetryPolicy::default());
        let product = svc
            .create_product(&ProductCreate {
                name: "Laces".into(),
                category: "accessories".into(),
                brand: None,
                price: 300,
                colors: vec![],
                sizes: vec![],
                variants: None,
                stock_quantity: Some(stock),
                low_stock_threshold: None,
            })
            .await
            .unwrap();
        (svc, product.id)
    }

    fn sale(sale_id: &str, product_id: i64, quantity: i64) -> PosSaleRequest {
        PosSaleRequest {
            sale_id: Some(sale_id.into()),
            payment_method: "CASH".into(),
            items: vec![SaleLine::new(product_id, "", "", quantity)],
        }
    }

    #[tokio::test]
    async fn finalized_sale_updates_daily_totals() {
        let (svc, product_id) = service_with_laces(10).await;

        let first = finalize_sale(&svc, &sale("pos-1", product_id, 2), 3, "Bo").await.unwrap();
        finalize_sale(&svc, &sale("pos-2", product_id, 1), 3, "Bo").await.unwrap();

        assert_eq!(first.transaction.total, 600);
        assert_eq!(first.items[0].color, None);

        let daily = daily_sales(&svc, &first.transaction.business_date)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(daily.transaction_count, 2);
        assert_eq!(daily.units_sold, 3);
        assert_eq!(daily.revenue, 900);
        assert_eq!(svc.get_aggregate_stock(product_id).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn rejected_sale_leaves_daily_totals_alone() {
        let (svc, product_id) = service_with_laces(1).await;

        let err = finalize_sale(&svc, &sale("pos-1", product_id, 2), 3, "Bo")
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::InsufficientStock(_)));

        let today = shared::util::business_date(shared::util::now_millis());
        assert!(daily_sales(&svc, &today).await.unwrap().is_none());
        assert!(pos::find_by_sale_id(svc.pool(), "pos-1").await.unwrap().is_none());
    }
}
