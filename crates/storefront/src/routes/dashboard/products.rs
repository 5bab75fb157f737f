//! Inventory management: list, add, edit, delete and Magic Write.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sanndikaa_core::{Category, ProductId, ShopId};

use super::{MultipartForm, current_shop, invalidate_shop_page, media_error_code};
use crate::db::ProductRepository;
use crate::error::{ApiError, AppError, Result};
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::{NewProduct, Product, ProductInputError, Shop};
use crate::routes::{MessageQuery, redirect_with_error};
use crate::services::MediaKind;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/products.html")]
pub struct ProductsTemplate {
    pub shop: Shop,
    pub products: Vec<Product>,
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Add and edit form. `product` is `None` when adding.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/product_form.html")]
pub struct ProductFormTemplate {
    pub shop: Shop,
    pub product: Option<Product>,
    pub categories: [Category; 6],
    pub error: Option<&'static str>,
}

impl ProductFormTemplate {
    fn action(&self) -> String {
        self.product
            .as_ref()
            .map_or_else(|| "/dashboard/add-product".to_string(), |p| format!("/dashboard/edit/{}", p.id))
    }

    /// Category preselected in the form.
    fn selected_category(&self) -> &'static str {
        self.product
            .as_ref()
            .map_or_else(Category::default, |p| p.category)
            .as_str()
    }
}

/// Magic Write request from the product form.
#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DescribeResponse {
    pub description: String,
}

/// Product list.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Query(query): Query<MessageQuery>,
) -> Result<ProductsTemplate> {
    let shop = current_shop(&state, &seller).await?;
    let products = ProductRepository::new(state.pool())
        .list_for_shop(shop.id)
        .await?;

    Ok(ProductsTemplate {
        shop,
        products,
        error: query.error_message(),
        success: query.success_message(),
    })
}

/// Empty add-product form.
pub async fn add_page(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Query(query): Query<MessageQuery>,
) -> Result<ProductFormTemplate> {
    Ok(ProductFormTemplate {
        shop: current_shop(&state, &seller).await?,
        product: None,
        categories: Category::ALL,
        error: query.error_message(),
    })
}

/// Create a product from the multipart form.
#[instrument(skip(state, seller, multipart), fields(seller_id = %seller.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    multipart: Multipart,
) -> Result<Response> {
    const BACK: &str = "/dashboard/add-product";

    let product = match read_product_form(&state, seller.shop_id, multipart).await {
        Ok(product) => product,
        Err(code) => return Ok(redirect_with_error(BACK, code)),
    };

    let created = match ProductRepository::new(state.pool())
        .create(seller.shop_id, &product)
        .await
    {
        Ok(created) => created,
        Err(e) => {
            tracing::error!(error = %e, "Could not add product");
            discard_image(&state, seller.shop_id, &product).await;
            return Ok(redirect_with_error(BACK, "server"));
        }
    };
    tracing::info!(product_id = %created.id, "Product added");

    invalidate_shop_page(&state, seller.shop_id).await;
    Ok(Redirect::to("/dashboard/products?success=product_added").into_response())
}

/// Edit form for an owned product.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
    Query(query): Query<MessageQuery>,
) -> Result<ProductFormTemplate> {
    let product = owned_product(&state, &id, seller.shop_id).await?;
    Ok(ProductFormTemplate {
        shop: current_shop(&state, &seller).await?,
        product: Some(product),
        categories: Category::ALL,
        error: query.error_message(),
    })
}

/// Update an owned product. Without a new image the old one stays.
#[instrument(skip(state, seller, multipart), fields(seller_id = %seller.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let existing = owned_product(&state, &id, seller.shop_id).await?;
    let back = format!("/dashboard/edit/{}", existing.id);

    let product = match read_product_form(&state, seller.shop_id, multipart).await {
        Ok(product) => product,
        Err(code) => return Ok(redirect_with_error(&back, code)),
    };

    if let Err(e) = ProductRepository::new(state.pool())
        .update(existing.id, seller.shop_id, &product)
        .await
    {
        tracing::error!(error = %e, product_id = %existing.id, "Could not update product");
        discard_image(&state, seller.shop_id, &product).await;
        return Ok(redirect_with_error(&back, "server"));
    }
    state
        .media()
        .remove_replaced(
            seller.shop_id,
            existing.image_url.as_deref(),
            product.image_url.as_deref(),
        )
        .await;

    invalidate_shop_page(&state, seller.shop_id).await;
    Ok(Redirect::to("/dashboard/products?success=product_updated").into_response())
}

/// Delete an owned product.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
) -> Result<Response> {
    const BACK: &str = "/dashboard/products";

    let Ok(id) = id.parse::<i32>().map(ProductId::new) else {
        return Ok(redirect_with_error(BACK, "not_found"));
    };

    let deleted = match ProductRepository::new(state.pool())
        .delete(id, seller.shop_id)
        .await
    {
        Ok(Some(deleted)) => deleted,
        Ok(None) => return Ok(redirect_with_error(BACK, "not_found")),
        Err(e) => {
            tracing::error!(error = %e, product_id = %id, "Could not delete product");
            return Ok(redirect_with_error(BACK, "server"));
        }
    };
    if let Some(image_url) = &deleted.image_url {
        state.media().remove(seller.shop_id, image_url).await;
    }

    invalidate_shop_page(&state, seller.shop_id).await;
    Ok(Redirect::to("/dashboard/products?success=product_deleted").into_response())
}

/// Magic Write: a description for the name typed so far.
#[instrument(skip(state, _seller, request))]
pub async fn describe(
    State(state): State<AppState>,
    RequireSeller(_seller): RequireSeller,
    Json(request): Json<DescribeRequest>,
) -> std::result::Result<Json<DescribeResponse>, ApiError> {
    let category = request
        .category
        .as_deref()
        .map(Category::from_str_lossy)
        .unwrap_or_default();
    let description = state
        .descriptions()
        .describe(&request.name, category)
        .await?;
    Ok(Json(DescribeResponse { description }))
}

async fn owned_product(state: &AppState, raw_id: &str, shop_id: ShopId) -> Result<Product> {
    let id = raw_id
        .parse::<i32>()
        .map(ProductId::new)
        .map_err(|_| AppError::NotFound(raw_id.to_string()))?;
    ProductRepository::new(state.pool())
        .get_owned(id, shop_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Validate the product form and store its image.
///
/// Returns the error code to redirect back with.
async fn read_product_form(
    state: &AppState,
    shop_id: ShopId,
    multipart: Multipart,
) -> std::result::Result<NewProduct, &'static str> {
    let mut form = MultipartForm::read(multipart).await.map_err(|e| {
        tracing::warn!(error = %e, "Could not read product form");
        "upload"
    })?;

    let mut product = NewProduct::from_input(
        form.text("name").unwrap_or_default(),
        form.text("price").unwrap_or_default(),
        form.text("category").unwrap_or_default(),
        form.text("description"),
    )
    .map_err(|e| match e {
        ProductInputError::MissingName => "name",
        ProductInputError::Price(_) => "price",
    })?;

    let image = form.take_file("image");
    product.image_url = state
        .media()
        .save(MediaKind::Product, shop_id, &image)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected product image");
            media_error_code(&e)
        })?;

    Ok(product)
}

/// Remove an image stored for a product that was never saved.
async fn discard_image(state: &AppState, shop_id: ShopId, product: &NewProduct) {
    if let Some(url) = &product.image_url {
        state.media().remove(shop_id, url).await;
    }
}
