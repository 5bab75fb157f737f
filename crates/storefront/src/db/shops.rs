//! Shop repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use sanndikaa_core::{SellerId, ShopId, ShopSlug, ThemeColor, WhatsAppNumber};

use super::{RepositoryError, corrupt};
use crate::models::{Shop, ShopSettings};

/// Columns selected for a full shop row.
pub(crate) const SHOP_COLUMNS: &str = "id, seller_id, name, slug, whatsapp_number, logo_url, \
     banner_url, bio, theme_color, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(crate) struct ShopRow {
    id: i32,
    seller_id: i32,
    name: String,
    slug: String,
    whatsapp_number: String,
    logo_url: Option<String>,
    banner_url: Option<String>,
    bio: Option<String>,
    theme_color: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ShopRow> for Shop {
    type Error = RepositoryError;

    fn try_from(r: ShopRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ShopId::new(r.id),
            seller_id: SellerId::new(r.seller_id),
            name: r.name,
            slug: ShopSlug::parse(&r.slug).map_err(|e| corrupt("slug", e))?,
            whatsapp_number: WhatsAppNumber::parse(&r.whatsapp_number)
                .map_err(|e| corrupt("whatsapp_number", e))?,
            logo_url: r.logo_url,
            banner_url: r.banner_url,
            bio: r.bio,
            theme: ThemeColor::from_db(Some(&r.theme_color)),
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a shop by its public slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_by_slug(&self, slug: &ShopSlug) -> Result<Option<Shop>, RepositoryError> {
        let row: Option<ShopRow> = sqlx::query_as(&format!(
            "SELECT {SHOP_COLUMNS} FROM sanndikaa.shop WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Shop::try_from).transpose()
    }

    /// Get the shop owned by a seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_seller(&self, seller_id: SellerId) -> Result<Option<Shop>, RepositoryError> {
        let row: Option<ShopRow> = sqlx::query_as(&format!(
            "SELECT {SHOP_COLUMNS} FROM sanndikaa.shop WHERE seller_id = $1"
        ))
        .bind(seller_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Shop::try_from).transpose()
    }

    /// Get a shop by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let row: Option<ShopRow> = sqlx::query_as(&format!(
            "SELECT {SHOP_COLUMNS} FROM sanndikaa.shop WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Shop::try_from).transpose()
    }

    /// Whether a slug is already in use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn slug_exists(&self, slug: &ShopSlug) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sanndikaa.shop WHERE slug = $1)")
                .bind(slug.as_str())
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }

    /// Save the seller's shop settings.
    ///
    /// The slug is never touched. A `None` logo or banner keeps the current
    /// image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the seller has no shop.
    #[instrument(skip(self, settings), fields(seller_id = %seller_id))]
    pub async fn update_settings(
        &self,
        seller_id: SellerId,
        settings: &ShopSettings,
    ) -> Result<Shop, RepositoryError> {
        let row: Option<ShopRow> = sqlx::query_as(&format!(
            r"
            UPDATE sanndikaa.shop
            SET name = $2,
                whatsapp_number = $3,
                bio = $4,
                theme_color = $5,
                logo_url = COALESCE($6, logo_url),
                banner_url = COALESCE($7, banner_url),
                updated_at = now()
            WHERE seller_id = $1
            RETURNING {SHOP_COLUMNS}
            "
        ))
        .bind(seller_id.as_i32())
        .bind(&settings.name)
        .bind(settings.whatsapp_number.as_str())
        .bind(settings.bio.as_deref())
        .bind(settings.theme.as_str())
        .bind(settings.logo_url.as_deref())
        .bind(settings.banner_url.as_deref())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound).and_then(Shop::try_from)
    }
}
