//! Lead repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use sanndikaa_core::{Dalasi, LeadId, PaymentMethod, ProductId, ShopId};

use super::{RepositoryError, corrupt};
use crate::models::{Lead, LeadSummary, NewLead};

#[derive(sqlx::FromRow)]
struct LeadRow {
    id: i32,
    shop_id: i32,
    product_id: Option<i32>,
    product_name: String,
    product_price: Decimal,
    payment_method: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LeadRow> for Lead {
    type Error = RepositoryError;

    fn try_from(r: LeadRow) -> Result<Self, Self::Error> {
        let payment_method = PaymentMethod::parse(&r.payment_method)
            .ok_or_else(|| corrupt("payment_method", &r.payment_method))?;
        Ok(Self {
            id: LeadId::new(r.id),
            shop_id: ShopId::new(r.shop_id),
            product_id: r.product_id.map(ProductId::new),
            product_name: r.product_name,
            product_price: Dalasi::try_from(r.product_price)
                .map_err(|e| corrupt("product_price", e))?,
            payment_method,
            created_at: r.created_at,
        })
    }
}

/// Repository for lead database operations.
pub struct LeadRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeadRepository<'a> {
    /// Create a new lead repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a buyer heading to WhatsApp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, lead), fields(shop_id = %lead.shop_id, product_id = %lead.product_id))]
    pub async fn record(&self, lead: &NewLead) -> Result<LeadId, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO sanndikaa.lead
                (shop_id, product_id, product_name, product_price, payment_method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(lead.shop_id.as_i32())
        .bind(lead.product_id.as_i32())
        .bind(&lead.product_name)
        .bind(lead.product_price.amount())
        .bind(lead.payment_method.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(LeadId::new(id))
    }

    /// Leads for a shop, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shop(&self, shop_id: ShopId) -> Result<Vec<Lead>, RepositoryError> {
        let rows: Vec<LeadRow> = sqlx::query_as(
            r"
            SELECT id, shop_id, product_id, product_name, product_price, payment_method, created_at
            FROM sanndikaa.lead
            WHERE shop_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(shop_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Lead::try_from).collect()
    }

    /// Lead count and potential revenue for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summary(&self, shop_id: ShopId) -> Result<LeadSummary, RepositoryError> {
        let (total_leads, revenue): (i64, Decimal) = sqlx::query_as(
            r"
            SELECT COUNT(*)::BIGINT, COALESCE(SUM(product_price), 0)
            FROM sanndikaa.lead
            WHERE shop_id = $1
            ",
        )
        .bind(shop_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(LeadSummary {
            total_leads,
            potential_revenue: Dalasi::new(revenue),
        })
    }
}
