//! Seller accounts.

use chrono::{DateTime, Utc};

use sanndikaa_core::{Email, SellerId};

/// A seller who owns one shop.
#[derive(Debug, Clone)]
pub struct Seller {
    pub id: SellerId,
    /// Login email.
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
