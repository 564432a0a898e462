//! Sale channels
//!
//! Online checkout and in-store POS. Both are thin callers of
//! [`StockService::reserve_with`](crate::inventory::StockService::reserve_with)
//! that persist their own sale record through a
//! [`SaleRecorder`](crate::inventory::SaleRecorder) in the stock transaction.

pub mod checkout;
pub mod pos;

/// Use the client's sale id, or mint one for clients that send none
pub(crate) fn sale_id_or_new(sale_id: Option<&str>) -> String {
    match sale_id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => uuid::Uuid::new_v4().to_string(),
    }
}
