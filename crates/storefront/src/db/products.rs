//! Product repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use sanndikaa_core::{
    Category, Dalasi, ProductId, ShopId, ShopSlug, ThemeColor, WhatsAppNumber,
};

use super::{RepositoryError, corrupt};
use crate::models::{InventoryStats, NewProduct, Product, ProductWithShop, ShopSummary};

const PRODUCT_COLUMNS: &str = "p.id, p.shop_id, p.name, p.price, p.category, p.description, \
     p.image_url, p.created_at, p.updated_at";

const SHOP_SUMMARY_COLUMNS: &str = "s.name AS shop_name, s.slug AS shop_slug, \
     s.whatsapp_number AS shop_whatsapp, s.logo_url AS shop_logo_url, \
     s.theme_color AS shop_theme";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    shop_id: i32,
    name: String,
    price: Decimal,
    category: String,
    description: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(r.id),
            shop_id: ShopId::new(r.shop_id),
            name: r.name,
            price: Dalasi::try_from(r.price).map_err(|e| corrupt("price", e))?,
            category: Category::from_str_lossy(&r.category),
            description: r.description,
            image_url: r.image_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProductWithShopRow {
    #[sqlx(flatten)]
    product: ProductRow,
    shop_name: String,
    shop_slug: String,
    shop_whatsapp: String,
    shop_logo_url: Option<String>,
    shop_theme: String,
}

impl TryFrom<ProductWithShopRow> for ProductWithShop {
    type Error = RepositoryError;

    fn try_from(r: ProductWithShopRow) -> Result<Self, Self::Error> {
        let product = Product::try_from(r.product)?;
        let shop = ShopSummary {
            id: product.shop_id,
            name: r.shop_name,
            slug: ShopSlug::parse(&r.shop_slug).map_err(|e| corrupt("slug", e))?,
            whatsapp_number: WhatsAppNumber::parse(&r.shop_whatsapp)
                .map_err(|e| corrupt("whatsapp_number", e))?,
            logo_url: r.shop_logo_url,
            theme: ThemeColor::from_db(Some(&r.shop_theme)),
        };
        Ok(Self { product, shop })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Newest products across every shop, for the marketplace home page.
    ///
    /// `search` matches product names case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_recent(
        &self,
        limit: i64,
        search: Option<&str>,
    ) -> Result<Vec<ProductWithShop>, RepositoryError> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        let rows: Vec<ProductWithShopRow> = sqlx::query_as(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}, {SHOP_SUMMARY_COLUMNS}
            FROM sanndikaa.product p
            JOIN sanndikaa.shop s ON s.id = p.shop_id
            WHERE $1::TEXT IS NULL OR p.name ILIKE $1
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2
            "
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductWithShop::try_from).collect()
    }

    /// All products of a shop, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM sanndikaa.product p
            WHERE p.shop_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            "
        ))
        .bind(shop_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// A product with the shop selling it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_shop(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductWithShop>, RepositoryError> {
        let row: Option<ProductWithShopRow> = sqlx::query_as(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}, {SHOP_SUMMARY_COLUMNS}
            FROM sanndikaa.product p
            JOIN sanndikaa.shop s ON s.id = p.shop_id
            WHERE p.id = $1
            "
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductWithShop::try_from).transpose()
    }

    /// A product, only if it belongs to `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_owned(
        &self,
        id: ProductId,
        shop_id: ShopId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM sanndikaa.product p WHERE p.id = $1 AND p.shop_id = $2"
        ))
        .bind(id.as_i32())
        .bind(shop_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Add a product to a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, product), fields(shop_id = %shop_id, name = %product.name))]
    pub async fn create(
        &self,
        shop_id: ShopId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            r"
            INSERT INTO sanndikaa.product AS p
                (shop_id, name, price, category, description, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(shop_id.as_i32())
        .bind(&product.name)
        .bind(product.price.amount())
        .bind(product.category.as_str())
        .bind(product.description.as_deref())
        .bind(product.image_url.as_deref())
        .fetch_one(self.pool)
        .await?;

        Product::try_from(row)
    }

    /// Update a product owned by `shop_id`.
    ///
    /// Without a new image the previous one is kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist or
    /// belongs to another shop.
    #[instrument(skip(self, product), fields(product_id = %id, shop_id = %shop_id))]
    pub async fn update(
        &self,
        id: ProductId,
        shop_id: ShopId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            r"
            UPDATE sanndikaa.product AS p
            SET name = $3,
                price = $4,
                category = $5,
                description = $6,
                image_url = COALESCE($7, p.image_url),
                updated_at = now()
            WHERE p.id = $1 AND p.shop_id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id.as_i32())
        .bind(shop_id.as_i32())
        .bind(&product.name)
        .bind(product.price.amount())
        .bind(product.category.as_str())
        .bind(product.description.as_deref())
        .bind(product.image_url.as_deref())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
            .and_then(Product::try_from)
    }

    /// Delete a product owned by `shop_id`, returning it so its image can
    /// be removed. `None` if no such product belongs to the shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(product_id = %id, shop_id = %shop_id))]
    pub async fn delete(
        &self,
        id: ProductId,
        shop_id: ShopId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "DELETE FROM sanndikaa.product AS p WHERE p.id = $1 AND p.shop_id = $2 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(shop_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Product count, total listed value and rounded average price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn inventory_stats(&self, shop_id: ShopId) -> Result<InventoryStats, RepositoryError> {
        let (count, total): (i64, Decimal) = sqlx::query_as(
            r"
            SELECT COUNT(*)::BIGINT, COALESCE(SUM(price), 0)
            FROM sanndikaa.product
            WHERE shop_id = $1
            ",
        )
        .bind(shop_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        // A sum of stored prices can exceed a single price's range.
        Ok(InventoryStats::new(count, Dalasi::new(total)))
    }
}

/// Escape `%`, `_` and `\` so user input matches literally in `ILIKE`.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("shea butter"), "shea butter");
        assert_eq!(escape_like("100%_pure"), "100\\%\\_pure");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
