//! Orders placed from the compact shop listing.

use chrono::{DateTime, Utc};

use sanndikaa_core::{Dalasi, OrderId, OrderStatus, ProductId, ShopId};

/// A recorded order request. Fulfilment happens on WhatsApp.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub shop_id: Option<ShopId>,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub price: Dalasi,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub shop_id: Option<ShopId>,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub price: Dalasi,
}
