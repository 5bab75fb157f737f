//! Seller repository.
//!
//! Sellers and shops are created together: registration is one form and a
//! seller without a shop has nothing to do in the dashboard.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use sanndikaa_core::{Email, SellerId};

use super::shops::{SHOP_COLUMNS, ShopRow};
use super::{RepositoryError, corrupt, map_unique_violation};
use crate::models::{NewShop, Seller, Shop};

#[derive(sqlx::FromRow)]
struct SellerRow {
    id: i32,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SellerRow> for Seller {
    type Error = RepositoryError;

    fn try_from(r: SellerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SellerId::new(r.id),
            email: Email::parse(&r.email).map_err(|e| corrupt("email", e))?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SellerWithHashRow {
    #[sqlx(flatten)]
    seller: SellerRow,
    password_hash: String,
}

/// Repository for seller database operations.
pub struct SellerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SellerRepository<'a> {
    /// Create a new seller repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a seller and their shop in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` with [`super::EMAIL_TAKEN`] or
    /// [`super::SLUG_TAKEN`] on a duplicate.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, password_hash, shop), fields(email = %email, slug = %shop.slug))]
    pub async fn create_with_shop(
        &self,
        email: &Email,
        password_hash: &str,
        shop: &NewShop,
    ) -> Result<(Seller, Shop), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let seller: SellerRow = sqlx::query_as(
            r"
            INSERT INTO sanndikaa.seller (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        let shop_row: ShopRow = sqlx::query_as(&format!(
            r"
            INSERT INTO sanndikaa.shop (seller_id, name, slug, whatsapp_number)
            VALUES ($1, $2, $3, $4)
            RETURNING {SHOP_COLUMNS}
            "
        ))
        .bind(seller.id)
        .bind(&shop.name)
        .bind(shop.slug.as_str())
        .bind(shop.whatsapp_number.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await?;

        Ok((Seller::try_from(seller)?, Shop::try_from(shop_row)?))
    }

    /// Get a seller and their password hash for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Seller, String)>, RepositoryError> {
        let row: Option<SellerWithHashRow> = sqlx::query_as(
            r"
            SELECT id, email, created_at, updated_at, password_hash
            FROM sanndikaa.seller
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((Seller::try_from(r.seller)?, r.password_hash)))
            .transpose()
    }

    /// Get a seller by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: SellerId) -> Result<Option<Seller>, RepositoryError> {
        let row: Option<SellerRow> = sqlx::query_as(
            "SELECT id, email, created_at, updated_at FROM sanndikaa.seller WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Seller::try_from).transpose()
    }

    /// Get a seller by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Seller>, RepositoryError> {
        let row: Option<SellerRow> = sqlx::query_as(
            "SELECT id, email, created_at, updated_at FROM sanndikaa.seller WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Seller::try_from).transpose()
    }

    /// Replace a seller's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the seller does not exist.
    #[instrument(skip(self, password_hash), fields(seller_id = %id))]
    pub async fn update_password(
        &self,
        id: SellerId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE sanndikaa.seller
            SET password_hash = $2, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
