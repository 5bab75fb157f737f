//! Database operations for the storefront `PostgreSQL` database.
//!
//! ## Tables (schema `sanndikaa`)
//!
//! - `seller` - Seller logins
//! - `shop` - One shop per seller
//! - `product` - Listed products
//! - `customer_order` - Orders recorded from the compact shop listing
//! - `lead` - Buyers who opened WhatsApp from a product page
//! - `password_reset_token` - Hashed one-time reset tokens
//! - `tower_sessions.session` - Owned by tower-sessions-sqlx-store
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p sanndikaa-cli -- migrate
//! ```

pub mod leads;
pub mod orders;
pub mod products;
pub mod reset_tokens;
pub mod sellers;
pub mod shops;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use leads::LeadRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reset_tokens::ResetTokenRepository;
pub use sellers::SellerRepository;
pub use shops::ShopRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Conflict message for a duplicate seller email.
pub const EMAIL_TAKEN: &str = "email already exists";
/// Conflict message for a duplicate shop slug.
pub const SLUG_TAKEN: &str = "slug already exists";

/// Map unique violations to `Conflict`, naming the constraint that fired.
fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let message = match db_err.constraint() {
            Some("shop_slug_key") => SLUG_TAKEN,
            Some("seller_email_key") => EMAIL_TAKEN,
            Some(other) => other,
            None => "unique constraint",
        };
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

/// Build a `DataCorruption` error for a column that failed domain parsing.
fn corrupt(column: &str, err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::DataCorruption(format!("invalid {column} in database: {err}"))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
