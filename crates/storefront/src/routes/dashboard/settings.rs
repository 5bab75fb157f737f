//! Shop settings: name, WhatsApp number, bio, theme, logo and banner.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use sanndikaa_core::{ShopId, ThemeColor, WhatsAppNumber};

use super::{MultipartForm, current_shop, media_error_code};
use crate::db::ShopRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::{Shop, ShopSettings};
use crate::routes::{MessageQuery, redirect_with_error};
use crate::services::{MediaKind, Upload};
use crate::state::AppState;

const BACK: &str = "/dashboard/settings";

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/settings.html")]
pub struct SettingsTemplate {
    pub shop: Shop,
    pub shop_url: String,
    pub themes: [ThemeColor; 5],
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Settings form.
pub async fn show(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Query(query): Query<MessageQuery>,
) -> Result<SettingsTemplate> {
    let shop = current_shop(&state, &seller).await?;
    Ok(SettingsTemplate {
        shop_url: state.config().absolute_url(&shop.path()),
        shop,
        themes: ThemeColor::ALL,
        error: query.error_message(),
        success: query.success_message(),
    })
}

/// Save settings. The shop link (slug) never changes.
#[instrument(skip(state, seller, multipart), fields(seller_id = %seller.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    multipart: Multipart,
) -> Result<Response> {
    let form = match MultipartForm::read(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read settings form");
            return Ok(redirect_with_error(BACK, "upload"));
        }
    };

    let previous = current_shop(&state, &seller).await?;
    let settings = match validate_settings(&state, seller.shop_id, form).await {
        Ok(settings) => settings,
        Err(code) => return Ok(redirect_with_error(BACK, code)),
    };

    let shop = match ShopRepository::new(state.pool())
        .update_settings(seller.id, &settings)
        .await
    {
        Ok(shop) => shop,
        Err(e) => {
            tracing::error!(error = %e, "Could not save shop settings");
            discard_images(&state, seller.shop_id, &settings).await;
            return Ok(redirect_with_error(BACK, "server"));
        }
    };
    let media = state.media();
    media
        .remove_replaced(
            shop.id,
            previous.logo_url.as_deref(),
            settings.logo_url.as_deref(),
        )
        .await;
    media
        .remove_replaced(
            shop.id,
            previous.banner_url.as_deref(),
            settings.banner_url.as_deref(),
        )
        .await;
    state.shop_pages().invalidate(&shop.slug).await;
    tracing::info!(shop_id = %shop.id, "Shop settings updated");

    Ok(Redirect::to("/dashboard/settings?success=settings").into_response())
}

async fn validate_settings(
    state: &AppState,
    shop_id: ShopId,
    mut form: MultipartForm,
) -> std::result::Result<ShopSettings, &'static str> {
    let name = form.text("name").map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err("shop_name");
    }
    let whatsapp_number =
        WhatsAppNumber::parse(form.text("whatsapp").unwrap_or_default()).map_err(|_| "whatsapp")?;
    let bio = form
        .text("bio")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from);
    let theme = ThemeColor::from_db(form.text("theme"));

    let name = name.to_string();
    let logo = form.take_file("logo");
    let banner = form.take_file("banner");

    let logo_url = store_image(state, MediaKind::Logo, shop_id, &logo).await?;
    let banner_url = match store_image(state, MediaKind::Banner, shop_id, &banner).await {
        Ok(url) => url,
        Err(code) => {
            if let Some(url) = &logo_url {
                state.media().remove(shop_id, url).await;
            }
            return Err(code);
        }
    };

    Ok(ShopSettings {
        name,
        whatsapp_number,
        bio,
        theme,
        logo_url,
        banner_url,
    })
}

/// Remove images stored for settings that were never saved.
async fn discard_images(state: &AppState, shop_id: ShopId, settings: &ShopSettings) {
    for url in [&settings.logo_url, &settings.banner_url].into_iter().flatten() {
        state.media().remove(shop_id, url).await;
    }
}

async fn store_image(
    state: &AppState,
    kind: MediaKind,
    shop_id: ShopId,
    upload: &Upload,
) -> std::result::Result<Option<String>, &'static str> {
    state
        .media()
        .save(kind, shop_id, upload)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, ?kind, "Rejected shop image");
            media_error_code(&e)
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::shop::tests::sample_shop;

    #[test]
    fn test_settings_page() {
        let mut shop = sample_shop();
        shop.theme = ThemeColor::Ocean;
        let html = SettingsTemplate {
            shop_url: "http://localhost:3000/shop/awa-s-kitchen-42".to_string(),
            shop,
            themes: ThemeColor::ALL,
            error: None,
            success: Some("Shop settings updated successfully! 🏪"),
        }
        .render()
        .unwrap();

        assert!(html.contains("Shop Settings"));
        assert!(html.contains("Manage your brand identity and contact details."));
        assert!(html.contains("Customers will contact you on this number."));
        assert!(html.contains("Your Shop Link"));
        assert!(html.contains("http://localhost:3000/shop/awa-s-kitchen-42"));
        assert!(html.contains("value=\"ocean\" checked"));
        assert!(html.contains("Shop settings updated successfully!"));
    }
}
