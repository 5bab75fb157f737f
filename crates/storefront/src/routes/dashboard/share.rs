//! Poster studio: a printable or screenshot-ready product poster.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use sanndikaa_core::{PosterTheme, ProductId};

use super::current_shop;
use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::{Product, Shop};
use crate::services::whatsapp;
use crate::state::AppState;

const DEFAULT_HEADLINE: &str = "BACK IN STOCK";
const MAX_HEADLINE_LEN: usize = 40;

#[derive(Debug, Default, Deserialize)]
pub struct PosterQuery {
    pub theme: Option<String>,
    pub headline: Option<String>,
    pub show_price: Option<String>,
}

impl PosterQuery {
    fn headline(&self) -> String {
        let headline = self
            .headline
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HEADLINE);
        headline.chars().take(MAX_HEADLINE_LEN).collect()
    }

    /// Price is shown unless explicitly switched off.
    fn show_price(&self) -> bool {
        !matches!(self.show_price.as_deref(), Some("false" | "0" | "off"))
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/poster.html")]
pub struct PosterTemplate {
    pub shop: Shop,
    pub product: Product,
    pub theme: PosterTheme,
    pub themes: [PosterTheme; 4],
    pub headline: String,
    pub show_price: bool,
    pub product_url: String,
    pub share_link: String,
}

impl PosterTemplate {
    /// Poster link with one setting changed, for the theme picker.
    fn theme_href(&self, theme: &str) -> String {
        format!(
            "/dashboard/share/{}?theme={}&headline={}&show_price={}",
            self.product.id,
            theme,
            urlencoding::encode(&self.headline),
            self.show_price
        )
    }
}

/// Poster for an owned product.
#[instrument(skip(state, seller, query), fields(seller_id = %seller.id))]
pub async fn poster(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
    Query(query): Query<PosterQuery>,
) -> Result<PosterTemplate> {
    let id = id
        .parse::<i32>()
        .map(ProductId::new)
        .map_err(|_| AppError::NotFound(id.clone()))?;
    let product = ProductRepository::new(state.pool())
        .get_owned(id, seller.shop_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let shop = current_shop(&state, &seller).await?;

    let product_url = state.config().absolute_url(&product.path());
    let share_link = whatsapp::share_link(&product.name, product.price, &product_url);

    Ok(PosterTemplate {
        shop,
        theme: PosterTheme::from_query(query.theme.as_deref()),
        themes: PosterTheme::ALL,
        headline: query.headline(),
        show_price: query.show_price(),
        product,
        product_url,
        share_link,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sanndikaa_core::{Category, Dalasi, ShopId};

    use super::*;
    use crate::models::shop::tests::sample_shop;

    fn template(theme: PosterTheme, show_price: bool) -> PosterTemplate {
        PosterTemplate {
            shop: sample_shop(),
            product: Product {
                id: ProductId::new(5),
                shop_id: ShopId::new(1),
                name: "Batik Shirt".to_string(),
                price: Dalasi::parse("800").unwrap(),
                category: Category::Fashion,
                description: None,
                image_url: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            theme,
            themes: PosterTheme::ALL,
            headline: DEFAULT_HEADLINE.to_string(),
            show_price,
            product_url: "http://localhost:3000/product/5".to_string(),
            share_link: "https://wa.me/?text=x".to_string(),
        }
    }

    #[test]
    fn test_query_defaults() {
        let query = PosterQuery::default();
        assert_eq!(query.headline(), "BACK IN STOCK");
        assert!(query.show_price());

        let query = PosterQuery {
            theme: None,
            headline: Some("  New Arrivals ".to_string()),
            show_price: Some("false".to_string()),
        };
        assert_eq!(query.headline(), "New Arrivals");
        assert!(!query.show_price());

        let query = PosterQuery {
            headline: Some("x".repeat(100)),
            ..PosterQuery::default()
        };
        assert_eq!(query.headline().len(), MAX_HEADLINE_LEN);
    }

    #[test]
    fn test_theme_href_keeps_other_settings() {
        let t = template(PosterTheme::Minimal, false);
        assert_eq!(
            t.theme_href(PosterTheme::Hype.as_str()),
            "/dashboard/share/5?theme=hype&headline=BACK%20IN%20STOCK&show_price=false"
        );
    }

    #[test]
    fn test_poster_hides_price_when_asked() {
        let html = template(PosterTheme::Glass, true).render().unwrap();
        assert!(html.contains("poster-glass"));
        assert!(html.contains("Sanndikaa Studio"));
        assert!(html.contains("D800"));

        let html = template(PosterTheme::Glass, false).render().unwrap();
        assert!(!html.contains("D800"));
    }
}
