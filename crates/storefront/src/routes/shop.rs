//! Public shop page.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use sanndikaa_core::ShopSlug;

use crate::cache::ShopPage;
use crate::error::{NotFoundTemplate, Result};
use crate::filters;
use crate::services::whatsapp;
use crate::state::AppState;

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub page: Arc<ShopPage>,
    pub chat_link: String,
    pub og_image: Option<String>,
}

/// Load a shop page by raw slug, `None` when the slug is malformed or unknown.
pub(super) async fn load_page(state: &AppState, slug: &str) -> Result<Option<Arc<ShopPage>>> {
    let Ok(slug) = ShopSlug::parse(slug) else {
        return Ok(None);
    };
    Ok(state.shop_pages().get_or_load(state.pool(), &slug).await?)
}

/// The "Shop Not Found" page.
pub(super) fn shop_not_found() -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate::shop()).into_response()
}

/// Display a shop: themed header, logo, bio, chat button and products.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response> {
    let Some(page) = load_page(&state, &slug).await? else {
        return Ok(shop_not_found());
    };

    let chat_link = whatsapp::chat_link(&page.shop.whatsapp_number);
    let og_image = page
        .shop
        .og_image()
        .map(|img| absolute_image(&state, img));

    Ok(ShopTemplate {
        page,
        chat_link,
        og_image,
    }
    .into_response())
}

/// Uploaded images are stored as site paths; link previews need full URLs.
pub(super) fn absolute_image(state: &AppState, url: &str) -> String {
    if url.starts_with('/') {
        state.config().absolute_url(url)
    } else {
        url.to_string()
    }
}
