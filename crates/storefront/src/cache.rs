//! Public shop page cache.
//!
//! Shop pages are read far more often than sellers edit them. Entries live
//! for a minute and are invalidated when the owner saves settings or changes
//! a product.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument};

use sanndikaa_core::ShopSlug;

use crate::db::{ProductRepository, RepositoryError, ShopRepository};
use crate::models::{Product, Shop};

/// A shop together with its products, newest first.
#[derive(Debug, Clone)]
pub struct ShopPage {
    pub shop: Shop,
    pub products: Vec<Product>,
}

/// Cache of [`ShopPage`]s keyed by slug.
#[derive(Clone)]
pub struct ShopPageCache {
    cache: Cache<String, Arc<ShopPage>>,
}

impl ShopPageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(60))
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Get a shop page, loading it from the database on a miss.
    ///
    /// Unknown slugs are not cached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if loading fails.
    #[instrument(skip(self, pool), fields(slug = %slug))]
    pub async fn get_or_load(
        &self,
        pool: &PgPool,
        slug: &ShopSlug,
    ) -> Result<Option<Arc<ShopPage>>, RepositoryError> {
        if let Some(page) = self.cache.get(slug.as_str()).await {
            debug!("Cache hit for shop page");
            return Ok(Some(page));
        }

        let Some(shop) = ShopRepository::new(pool).get_by_slug(slug).await? else {
            return Ok(None);
        };
        let products = ProductRepository::new(pool).list_for_shop(shop.id).await?;

        let page = Arc::new(ShopPage { shop, products });
        self.cache
            .insert(slug.as_str().to_owned(), Arc::clone(&page))
            .await;
        Ok(Some(page))
    }

    /// Drop a shop's cached page.
    pub async fn invalidate(&self, slug: &ShopSlug) {
        self.cache.invalidate(slug.as_str()).await;
    }

    /// Insert a page directly.
    pub async fn insert(&self, page: ShopPage) {
        let key = page.shop.slug.as_str().to_owned();
        self.cache.insert(key, Arc::new(page)).await;
    }

    /// Look up a page without touching the database.
    pub async fn get(&self, slug: &ShopSlug) -> Option<Arc<ShopPage>> {
        self.cache.get(slug.as_str()).await
    }
}

impl Default for ShopPageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shop::tests::sample_shop;

    #[tokio::test]
    async fn test_insert_and_invalidate() {
        let cache = ShopPageCache::new();
        let shop = sample_shop();
        let slug = shop.slug.clone();

        cache
            .insert(ShopPage {
                shop,
                products: Vec::new(),
            })
            .await;
        assert!(cache.get(&slug).await.is_some());

        cache.invalidate(&slug).await;
        assert!(cache.get(&slug).await.is_none());
    }
}
