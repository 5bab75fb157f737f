//! Integration tests for Sanndikaa.
//!
//! # Running Tests
//!
//! ```bash
//! # With PostgreSQL running and SANNDIKAA_DATABASE_URL set
//! cargo run -p sanndikaa-cli -- migrate
//!
//! # Database tests
//! cargo test -p sanndikaa-integration-tests --test database -- --ignored
//!
//! # HTTP tests (storefront running on STOREFRONT_BASE_URL)
//! cargo test -p sanndikaa-integration-tests --test storefront -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `database` - Repositories and auth against `PostgreSQL`
//! - `storefront` - Sign-up, dashboard and ordering over HTTP

use secrecy::SecretString;
use sqlx::PgPool;

use sanndikaa_storefront::models::{Seller, Shop};
use sanndikaa_storefront::services::{AuthService, RegisterSeller};

/// Password used for every seller these tests register.
pub const TEST_PASSWORD: &str = "sanndikaa-test";

/// Connect to the test database.
///
/// # Panics
///
/// Panics if no database URL is set or the connection fails.
#[allow(clippy::expect_used)]
pub async fn test_pool() -> PgPool {
    let url = std::env::var("SANNDIKAA_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("SANNDIKAA_DATABASE_URL"))
        .expect("SANNDIKAA_TEST_DATABASE_URL not set");
    sanndikaa_storefront::db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database")
}

/// An email no earlier run has used.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@test.sanndikaa.gm", uuid::Uuid::new_v4().simple())
}

/// Register a fresh seller with a shop.
///
/// # Panics
///
/// Panics if registration fails.
#[allow(clippy::expect_used)]
pub async fn register_seller(pool: &PgPool, shop_name: &str) -> (Seller, Shop) {
    let email = unique_email("seller");
    AuthService::new(pool)
        .register(RegisterSeller {
            email: &email,
            password: TEST_PASSWORD,
            shop_name,
            whatsapp: "7001122",
        })
        .await
        .expect("Failed to register seller")
}
