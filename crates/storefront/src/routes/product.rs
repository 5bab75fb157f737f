//! Product page and WhatsApp ordering.
//!
//! Ordering is a plain form post: the handler records a lead and answers
//! with a `303` to `wa.me`, so it works without JavaScript. Wave payments
//! take one extra step showing the merchant number first.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use sanndikaa_core::{PaymentMethod, ProductId};

use super::shop::absolute_image;
use crate::db::{LeadRepository, ProductRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{NewLead, ProductWithShop};
use crate::services::whatsapp;
use crate::state::AppState;

/// Order form posted from the product page.
#[derive(Debug, Default, Deserialize)]
pub struct OrderForm {
    pub method: Option<String>,
    /// `confirm` once a Wave buyer has seen the merchant number.
    pub step: Option<String>,
}

impl OrderForm {
    fn method(&self) -> PaymentMethod {
        self.method
            .as_deref()
            .and_then(PaymentMethod::parse)
            .unwrap_or_default()
    }

    fn is_confirmed(&self) -> bool {
        self.step.as_deref() == Some("confirm")
    }
}

/// Product page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub item: ProductWithShop,
    pub chat_link: String,
    pub og_image: Option<String>,
}

/// Wave / Sadam merchant number step.
#[derive(Template, WebTemplate)]
#[template(path = "wave_step.html")]
pub struct WaveStepTemplate {
    pub item: ProductWithShop,
}

/// Parse a product ID from the path. Anything but an integer is unknown.
pub(super) fn parse_product_id(raw: &str) -> Option<ProductId> {
    raw.parse::<i32>().ok().map(ProductId::new)
}

async fn load(state: &AppState, raw_id: &str) -> Result<ProductWithShop> {
    let id = parse_product_id(raw_id).ok_or_else(|| AppError::NotFound(raw_id.to_string()))?;
    ProductRepository::new(state.pool())
        .get_with_shop(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Display a product with its shop and the payment choice.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<ProductTemplate> {
    let item = load(&state, &id).await?;
    let chat_link = whatsapp::chat_link(&item.shop.whatsapp_number);
    let og_image = item
        .product
        .image_url
        .as_deref()
        .map(|img| absolute_image(&state, img));

    Ok(ProductTemplate {
        item,
        chat_link,
        og_image,
    })
}

/// Handle the order button.
///
/// Cash on delivery goes straight to WhatsApp. Wave first shows the
/// merchant number; its confirm button posts back with `step=confirm`.
#[instrument(skip(state, form), fields(method = ?form.method))]
pub async fn order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let item = load(&state, &id).await?;
    let method = form.method();

    if method == PaymentMethod::Wave && !form.is_confirmed() {
        return Ok(WaveStepTemplate { item }.into_response());
    }

    let lead = NewLead {
        shop_id: item.shop.id,
        product_id: item.product.id,
        product_name: item.product.name.clone(),
        product_price: item.product.price,
        payment_method: method,
    };
    // The buyer still gets to WhatsApp if analytics cannot be written.
    if let Err(e) = LeadRepository::new(state.pool()).record(&lead).await {
        tracing::error!(error = %e, product_id = %item.product.id, "Failed to record lead");
    }

    let product_id = item.product.id.to_string();
    add_breadcrumb(
        "order",
        "Opened WhatsApp order link",
        Some(&[("product_id", product_id.as_str()), ("method", method.as_str())]),
    );

    let link = whatsapp::order_link(
        &item.shop.whatsapp_number,
        &item.shop.name,
        &item.product.name,
        item.product.price,
        method,
    );
    Ok(Redirect::to(&link).into_response())
}

/// Redirect to a WhatsApp share message for the product.
#[instrument(skip(state))]
pub async fn share(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    let item = load(&state, &id).await?;
    let url = state.config().absolute_url(&item.product.path());
    Ok(Redirect::to(&whatsapp::share_link(
        &item.product.name,
        item.product.price,
        &url,
    )))
}
