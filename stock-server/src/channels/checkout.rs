//! Checkout order flow
//!
//! One engine call per cart. The order and its lines are written by the
//! recorder in the stock transaction, so a rejected cart leaves no order.

use shared::models::{CheckoutRequest, Order, OrderDetail, SaleChannel};
use sqlx::{Sqlite, Transaction};

use crate::db::repository::order::{self, NewOrderItem};
use crate::inventory::{CommittedSale, SaleRecorder, StockError, StockResult, StockService};

use super::sale_id_or_new;

pub const ORDER_STATUS_PLACED: &str = "PLACED";

/// Writes `customer_order` + `order_item`
#[derive(Debug, Clone)]
pub struct CheckoutRecorder<'a> {
    pub customer_name: &'a str,
    pub customer_email: Option<&'a str>,
    pub created_by: Option<i64>,
}

impl SaleRecorder for CheckoutRecorder<'_> {
    /// Order id
    type Output = i64;

    async fn record(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        sale: &CommittedSale,
    ) -> StockResult<i64> {
        let order = Order {
            id: shared::util::snowflake_id(),
            sale_id: sale.sale_id.clone(),
            customer_name: self.customer_name.to_string(),
            customer_email: self.customer_email.map(String::from),
            total: sale.total()?,
            item_count: sale.item_count()?,
            status: ORDER_STATUS_PLACED.to_string(),
            created_by: self.created_by,
            created_at: sale.now,
        };
        let items: Vec<NewOrderItem<'_>> = sale
            .lines
            .iter()
            .map(|l| {
                Ok(NewOrderItem {
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

        order::insert_order(tx, &order, &items).await?;
        Ok(order.id)
    }
}

/// Place an order for the whole cart
pub async fn place_order(
    stock: &StockService,
    req: &CheckoutRequest,
    created_by: Option<i64>,
) -> StockResult<OrderDetail> {
    let sale_id = sale_id_or_new(req.sale_id.as_deref());
    let recorder = CheckoutRecorder {
        customer_name: &req.customer_name,
        customer_email: req.customer_email.as_deref(),
        created_by,
    };

    let (_, order_id) = stock
        .reserve_with(&sale_id, SaleChannel::Checkout, &req.items, &recorder)
        .await?;

    tracing::info!(order_id, sale_id = %sale_id, "Checkout order placed");
    find_order(stock, order_id)
        .await?
        .ok_or_else(|| StockError::Database(format!("order {order_id} missing after commit")))
}

pub async fn find_order(stock: &StockService, id: i64) -> StockResult<Option<OrderDetail>> {
    Ok(order::find_by_id(stock.pool(), id).await?)
}
