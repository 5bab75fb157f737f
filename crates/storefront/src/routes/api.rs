//! JSON API.
//!
//! Errors come back as `{"error": "..."}` via [`ApiError`].

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sanndikaa_core::{Category, Dalasi, OrderId, OrderStatus, ProductId, ShopId};

use super::dashboard::invalidate_shop_page;
use crate::db::{OrderRepository, ProductRepository, ShopRepository};
use crate::error::{ApiError, AppError};
use crate::middleware::RequireSeller;
use crate::models::{NewOrder, NewProduct, Order, Product, ProductInputError};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Order as posted by the storefront script or a third party.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, alias = "storeId")]
    pub store_id: Option<i32>,
    #[serde(default, alias = "productId")]
    pub product_id: Option<i32>,
    #[serde(alias = "productName")]
    pub product_name: String,
    #[serde(alias = "price_d")]
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub store_id: Option<ShopId>,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub price: Dalasi,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            store_id: order.shop_id,
            product_id: order.product_id,
            product_name: order.product_name,
            price: order.price,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: OrderResponse,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub price: Dalasi,
    pub category: Category,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub url: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            url: product.path(),
            id: product.id,
            name: product.name,
            price: product.price,
            category: product.category,
            description: product.description,
            image_url: product.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub success: bool,
    pub product: ProductResponse,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDescriptionRequest {
    #[serde(alias = "productName")]
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateDescriptionResponse {
    pub description: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Record an order. Public: buyers place orders without an account.
///
/// Shop and product IDs are optional, but any given must exist and agree.
#[instrument(skip(state, request), fields(product_name = %request.product_name))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<CreateOrderResponse> {
    let product_name = request.product_name.trim();
    if product_name.is_empty() {
        return Err(AppError::BadRequest("Product name is required".to_string()).into());
    }
    let price = Dalasi::try_from(request.price)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (shop_id, product_id) = resolve_order_target(
        &state,
        request.store_id.map(ShopId::new),
        request.product_id.map(ProductId::new),
    )
    .await?;

    let order = OrderRepository::new(state.pool())
        .create(&NewOrder {
            shop_id,
            product_id,
            product_name: product_name.to_string(),
            price,
        })
        .await?;
    tracing::info!(order_id = %order.id, "Order recorded");

    Ok(Json(CreateOrderResponse {
        success: true,
        order: order.into(),
    }))
}

async fn resolve_order_target(
    state: &AppState,
    shop_id: Option<ShopId>,
    product_id: Option<ProductId>,
) -> Result<(Option<ShopId>, Option<ProductId>), AppError> {
    let products = ProductRepository::new(state.pool());
    match (shop_id, product_id) {
        (Some(shop_id), Some(product_id)) => {
            products
                .get_owned(product_id, shop_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
            Ok((Some(shop_id), Some(product_id)))
        }
        (None, Some(product_id)) => {
            let item = products
                .get_with_shop(product_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
            Ok((Some(item.shop.id), Some(product_id)))
        }
        (Some(shop_id), None) => {
            ShopRepository::new(state.pool())
                .get_by_id(shop_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("shop {shop_id}")))?;
            Ok((Some(shop_id), None))
        }
        (None, None) => Ok((None, None)),
    }
}

/// Create a product in the seller's shop.
#[instrument(skip(state, seller, request), fields(seller_id = %seller.id))]
pub async fn create_product(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<CreateProductResponse> {
    let mut product = NewProduct::from_input(
        &request.name,
        &request.price.to_string(),
        request.category.as_deref().unwrap_or_default(),
        request.description.as_deref(),
    )
    .map_err(|e| match e {
        ProductInputError::MissingName => AppError::BadRequest("Product name is required".into()),
        ProductInputError::Price(e) => AppError::BadRequest(e.to_string()),
    })?;
    product.image_url = request
        .image_url
        .map(|url| validate_image_url(&url))
        .transpose()?;

    let created = ProductRepository::new(state.pool())
        .create(seller.shop_id, &product)
        .await?;
    invalidate_shop_page(&state, seller.shop_id).await;

    Ok(Json(CreateProductResponse {
        success: true,
        product: created.into(),
    }))
}

/// Delete one of the seller's products.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn delete_product(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
) -> ApiResult<SuccessResponse> {
    let id = id
        .parse::<i32>()
        .map(ProductId::new)
        .map_err(|_| AppError::NotFound(id.clone()))?;

    let deleted = ProductRepository::new(state.pool())
        .delete(id, seller.shop_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    if let Some(image_url) = &deleted.image_url {
        state.media().remove(seller.shop_id, image_url).await;
    }

    invalidate_shop_page(&state, seller.shop_id).await;
    Ok(Json(SuccessResponse { success: true }))
}

/// Magic Write over JSON.
#[instrument(skip(state, _seller, request))]
pub async fn generate_description(
    State(state): State<AppState>,
    RequireSeller(_seller): RequireSeller,
    Json(request): Json<GenerateDescriptionRequest>,
) -> ApiResult<GenerateDescriptionResponse> {
    let category = request
        .category
        .as_deref()
        .map(Category::from_str_lossy)
        .unwrap_or_default();
    let description = state
        .descriptions()
        .describe(&request.product_name, category)
        .await?;
    Ok(Json(GenerateDescriptionResponse { description }))
}

/// Only our own media paths and https URLs may be stored as images.
fn validate_image_url(url: &str) -> Result<String, AppError> {
    let url = url.trim();
    let is_media = url.starts_with(&format!("{}/", crate::services::media::MEDIA_URL_PREFIX))
        && !url.contains("..");
    if is_media || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(AppError::BadRequest("Invalid image URL".to_string()))
    }
}
