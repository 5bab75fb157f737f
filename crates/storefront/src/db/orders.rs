//! Order repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use sanndikaa_core::{Dalasi, OrderId, OrderStatus, ProductId, ShopId};

use super::{RepositoryError, corrupt};
use crate::models::{NewOrder, Order};

const ORDER_COLUMNS: &str = "id, shop_id, product_id, product_name, price, status, created_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    shop_id: Option<i32>,
    product_id: Option<i32>,
    product_name: String,
    price: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(r.id),
            shop_id: r.shop_id.map(ShopId::new),
            product_id: r.product_id.map(ProductId::new),
            product_name: r.product_name,
            price: Dalasi::try_from(r.price).map_err(|e| corrupt("price", e))?,
            status: OrderStatus::from_db(&r.status),
            created_at: r.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an order with status `new`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including an
    /// unknown shop or product ID).
    #[instrument(skip(self, order), fields(product = %order.product_name))]
    pub async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let row: OrderRow = sqlx::query_as(&format!(
            r"
            INSERT INTO sanndikaa.customer_order (shop_id, product_id, product_name, price, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(order.shop_id.map(|id| id.as_i32()))
        .bind(order.product_id.map(|id| id.as_i32()))
        .bind(&order.product_name)
        .bind(order.price.amount())
        .bind(OrderStatus::New.as_str())
        .fetch_one(self.pool)
        .await?;

        Order::try_from(row)
    }

    /// Orders for a shop, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shop(&self, shop_id: ShopId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM sanndikaa.customer_order
            WHERE shop_id = $1
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(shop_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Mark an order of `shop_id` completed. Returns whether it was found.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self), fields(order_id = %id, shop_id = %shop_id))]
    pub async fn mark_completed(&self, id: OrderId, shop_id: ShopId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE sanndikaa.customer_order SET status = $3 WHERE id = $1 AND shop_id = $2",
        )
        .bind(id.as_i32())
        .bind(shop_id.as_i32())
        .bind(OrderStatus::Completed.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
