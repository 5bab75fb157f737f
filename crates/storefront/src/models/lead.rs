//! Purchase-intent leads captured when a buyer opens WhatsApp.

use chrono::{DateTime, Utc};

use sanndikaa_core::{Dalasi, LeadId, PaymentMethod, ProductId, ShopId};

/// A buyer who tapped an order button on a product page.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: LeadId,
    pub shop_id: ShopId,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub product_price: Dalasi,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLead {
    pub shop_id: ShopId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Dalasi,
    pub payment_method: PaymentMethod,
}

/// Analytics totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSummary {
    pub total_leads: i64,
    /// Sum of the prices of every lead's product.
    pub potential_revenue: Dalasi,
}
