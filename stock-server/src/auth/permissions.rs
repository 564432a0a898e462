//! Permission names
//!
//! Checked with [`CurrentUser::has_permission`](super::CurrentUser::has_permission);
//! `all`, the `admin` role and `prefix:*` wildcards grant them too.

/// Place checkout orders
pub const ORDERS_PLACE: &str = "orders:place";
/// Finalize POS sales and read POS records
pub const POS_SELL: &str = "pos:sell";
/// Adjust and reconcile stock, read the movement ledger
pub const STOCK_ADJUST: &str = "stock:adjust";
/// Create, edit and delete products and their color/size definition
pub const MENU_MANAGE: &str = "menu:manage";

/// Every permission this server checks
pub const ALL_PERMISSIONS: &[&str] = &[ORDERS_PLACE, POS_SELL, STOCK_ADJUST, MENU_MANAGE];
