//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use sanndikaa_core::{Email, SellerId, ShopId};

/// Session-stored seller identity.
///
/// Minimal data stored in the session to identify the logged-in seller and
/// the shop every dashboard query is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSeller {
    /// Seller's database ID.
    pub id: SellerId,
    /// Seller's login email.
    pub email: Email,
    /// The seller's shop.
    pub shop_id: ShopId,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in seller.
    pub const CURRENT_SELLER: &str = "current_seller";
}
