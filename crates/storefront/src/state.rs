//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::ShopPageCache;
use crate::config::StorefrontConfig;
use crate::services::{DescriptionError, DescriptionService, EmailService, MediaStore};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("description writer: {0}")]
    Description(#[from] DescriptionError),
    #[error("smtp: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    descriptions: DescriptionService,
    media: MediaStore,
    email: EmailService,
    shop_pages: ShopPageCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini or SMTP client cannot be built.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, StateError> {
        let descriptions = DescriptionService::new(config.gemini.as_ref())?;
        let email = EmailService::new(config.smtp.as_ref())?;
        let media = MediaStore::new(&config.media);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                descriptions,
                media,
                email,
                shop_pages: ShopPageCache::new(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn descriptions(&self) -> &DescriptionService {
        &self.inner.descriptions
    }

    #[must_use]
    pub fn media(&self) -> &MediaStore {
        &self.inner.media
    }

    #[must_use]
    pub fn email(&self) -> &EmailService {
        &self.inner.email
    }

    /// Cached public shop pages.
    #[must_use]
    pub fn shop_pages(&self) -> &ShopPageCache {
        &self.inner.shop_pages
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::config::tests::test_config;

    /// State whose pool never connects until a query runs.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn test_state() -> AppState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/sanndikaa_test")
            .unwrap();
        AppState::new(test_config(), pool).unwrap()
    }
}
