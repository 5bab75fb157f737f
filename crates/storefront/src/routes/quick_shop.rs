//! Compact shop listing with one-tap WhatsApp orders.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use super::product::parse_product_id;
use super::shop::{load_page, shop_not_found};
use crate::cache::ShopPage;
use crate::db::{OrderRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::NewOrder;
use crate::services::whatsapp;
use crate::state::AppState;

/// Quick shop template.
#[derive(Template, WebTemplate)]
#[template(path = "quick_shop.html")]
pub struct QuickShopTemplate {
    pub page: Arc<ShopPage>,
}

/// Display the compact listing.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response> {
    Ok(match load_page(&state, &slug).await? {
        Some(page) => QuickShopTemplate { page }.into_response(),
        None => shop_not_found(),
    })
}

/// Record an order and open WhatsApp with the quick-order message.
#[instrument(skip(state))]
pub async fn order(
    State(state): State<AppState>,
    Path((slug, product_id)): Path<(String, String)>,
) -> Result<Response> {
    let Some(page) = load_page(&state, &slug).await? else {
        return Ok(shop_not_found());
    };
    let id = parse_product_id(&product_id)
        .ok_or_else(|| AppError::NotFound(product_id.clone()))?;

    // Read through to the database: the cached page may predate a delete.
    let product = ProductRepository::new(state.pool())
        .get_owned(id, page.shop.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let new_order = NewOrder {
        shop_id: Some(page.shop.id),
        product_id: Some(product.id),
        product_name: product.name.clone(),
        price: product.price,
    };
    if let Err(e) = OrderRepository::new(state.pool()).create(&new_order).await {
        tracing::error!(error = %e, product_id = %product.id, "Failed to record order");
    }

    let link =
        whatsapp::quick_order_link(&page.shop.whatsapp_number, &product.name, product.price);
    Ok(Redirect::to(&link).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use sanndikaa_core::{Category, Dalasi, ProductId};

    use super::*;
    use crate::models::Product;
    use crate::models::shop::tests::sample_shop;
    use crate::test_support::{body_text, get, post_form};

    #[test]
    fn test_quick_shop_lists_order_buttons() {
        let shop = sample_shop();
        let product = Product {
            id: ProductId::new(3),
            shop_id: shop.id,
            name: "Wonjo".to_string(),
            price: Dalasi::parse("25").unwrap(),
            category: Category::Food,
            description: None,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let html = QuickShopTemplate {
            page: Arc::new(ShopPage {
                shop,
                products: vec![product],
            }),
        }
        .render()
        .unwrap();
        assert!(html.contains("action=\"/s/awa-s-kitchen-42/order/3\""));
        assert!(html.contains("🛒 Order on WhatsApp"));
        assert!(html.contains("D25"));
    }

    #[tokio::test]
    async fn test_unknown_slug_is_shop_not_found() {
        let response = get("/s/NOPE").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Shop Not Found"));

        let response = post_form("/s/NOPE/order/1", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
