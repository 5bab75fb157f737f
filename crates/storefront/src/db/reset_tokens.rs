//! Password reset tokens.
//!
//! Only the SHA-256 hash of a token is stored; the token itself lives in the
//! emailed link.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use sanndikaa_core::SellerId;

use super::RepositoryError;

/// Repository for password reset tokens.
pub struct ResetTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResetTokenRepository<'a> {
    /// Create a new reset token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a token hash for a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, token_hash), fields(seller_id = %seller_id))]
    pub async fn create(
        &self,
        seller_id: SellerId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO sanndikaa.password_reset_token (token_hash, seller_id, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(token_hash)
        .bind(seller_id.as_i32())
        .bind(expires_at)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Use a token. Returns the seller if it was unused and unexpired.
    ///
    /// A token can only be consumed once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip_all)]
    pub async fn consume(&self, token_hash: &str) -> Result<Option<SellerId>, RepositoryError> {
        let row: Option<(i32,)> = sqlx::query_as(
            r"
            UPDATE sanndikaa.password_reset_token
            SET used_at = now()
            WHERE token_hash = $1 AND used_at IS NULL AND expires_at > now()
            RETURNING seller_id
            ",
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id,)| SellerId::new(id)))
    }
}
