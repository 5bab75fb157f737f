//! Seller dashboard.
//!
//! Every handler takes a [`RequireSeller`](crate::middleware::RequireSeller)
//! and scopes its queries to the seller's shop.

pub mod analytics;
pub mod help;
pub mod orders;
pub mod overview;
pub mod password;
pub mod products;
pub mod settings;
pub mod share;

use axum::{
    Router,
    extract::multipart::{Field, Multipart, MultipartError},
    routing::{get, post},
};
use sanndikaa_core::ShopId;

use crate::db::ShopRepository;
use crate::error::{AppError, Result};
use crate::models::{CurrentSeller, Shop};
use crate::services::{MediaError, Upload};
use crate::state::AppState;

/// Create the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(overview::overview))
        .route("/products", get(products::list))
        .route(
            "/add-product",
            get(products::add_page).post(products::create),
        )
        .route("/edit/{id}", get(products::edit_page).post(products::update))
        .route("/products/{id}/delete", post(products::delete))
        .route("/products/describe", post(products::describe))
        .route("/orders", get(orders::list))
        .route("/orders/{id}/complete", post(orders::complete))
        .route("/analytics", get(analytics::analytics))
        .route("/settings", get(settings::show).post(settings::update))
        .route("/share/{id}", get(share::poster))
        .route("/help", get(help::chat))
        .route("/help/{topic}", get(help::answer))
        .route("/password", get(password::show).post(password::update))
}

/// Load the logged-in seller's shop.
async fn current_shop(state: &AppState, seller: &CurrentSeller) -> Result<Shop> {
    ShopRepository::new(state.pool())
        .get_by_id(seller.shop_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shop {}", seller.shop_id)))
}

/// Drop the cached public page of a shop after its owner changed something.
pub(crate) async fn invalidate_shop_page(state: &AppState, shop_id: ShopId) {
    match ShopRepository::new(state.pool()).get_by_id(shop_id).await {
        Ok(Some(shop)) => state.shop_pages().invalidate(&shop.slug).await,
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, shop_id = %shop_id, "Could not invalidate shop page"),
    }
}

/// Error code for a failed image upload.
const fn media_error_code(err: &MediaError) -> &'static str {
    match err {
        MediaError::UnsupportedType => "image_type",
        MediaError::TooLarge { .. } => "image_size",
        MediaError::Io(_) => "upload",
    }
}

/// A multipart form split into text fields and file uploads.
#[derive(Debug, Default)]
struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<(String, Upload)>,
}

impl MultipartForm {
    /// Read every part. Parts with a file name are uploads.
    async fn read(mut multipart: Multipart) -> std::result::Result<Self, MultipartError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if field.file_name().is_some() {
                let upload = read_upload(field).await?;
                form.files.push((name, upload));
            } else {
                form.fields.push((name, field.text().await?));
            }
        }
        Ok(form)
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Take an upload out of the form. Browsers send an empty part when no
    /// file was chosen; that comes back as an empty [`Upload`].
    fn take_file(&mut self, name: &str) -> Upload {
        self.files
            .iter()
            .position(|(key, _)| key == name)
            .map(|i| self.files.swap_remove(i).1)
            .unwrap_or_default()
    }
}

async fn read_upload(field: Field<'_>) -> std::result::Result<Upload, MultipartError> {
    let file_name = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);
    let bytes = field.bytes().await?;
    Ok(Upload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::{TEST_IP, get, location, post_form, test_app};

    pub(crate) const BOUNDARY: &str = "sanndikaa-test-boundary";

    /// Encode text fields and files as `multipart/form-data`.
    pub(crate) fn multipart_body(
        fields: &[(&str, &str)],
        files: &[(&str, &str, &str, &[u8])],
    ) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, file_name, content_type, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                     filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn parse(body: Vec<u8>) -> MultipartForm {
        use axum::extract::FromRequest;
        let multipart = Multipart::from_request(multipart_request(body), &())
            .await
            .unwrap();
        MultipartForm::read(multipart).await.unwrap()
    }

    #[tokio::test]
    async fn test_multipart_form_splits_fields_and_files() {
        let body = multipart_body(
            &[("name", "Baobab Juice"), ("price", "150")],
            &[
                ("image", "juice.png", "image/png", &b"png"[..]),
                ("banner", "", "application/octet-stream", &b""[..]),
            ],
        );
        let mut form = parse(body).await;

        assert_eq!(form.text("name"), Some("Baobab Juice"));
        assert_eq!(form.text("price"), Some("150"));
        assert_eq!(form.text("missing"), None);

        let image = form.take_file("image");
        assert_eq!(image.file_name.as_deref(), Some("juice.png"));
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, b"png");

        assert!(form.take_file("banner").bytes.is_empty());
        assert!(form.take_file("logo").bytes.is_empty());
    }

    #[test]
    fn test_media_error_codes() {
        assert_eq!(media_error_code(&MediaError::UnsupportedType), "image_type");
        assert_eq!(
            media_error_code(&MediaError::TooLarge { max: 1 }),
            "image_size"
        );
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        for path in [
            "/dashboard",
            "/dashboard/products",
            "/dashboard/add-product",
            "/dashboard/orders",
            "/dashboard/analytics",
            "/dashboard/settings",
            "/dashboard/share/1",
            "/dashboard/help",
            "/dashboard/help/sales",
            "/dashboard/password",
        ] {
            let response = get(path).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
            assert_eq!(location(&response), "/auth/login", "{path}");
        }

        let response = post_form("/dashboard/orders/1/complete", "").await;
        assert_eq!(location(&response), "/auth/login");
    }

    #[tokio::test]
    async fn test_dashboard_multipart_post_requires_login() {
        let request = Request::builder()
            .method("POST")
            .uri("/dashboard/add-product")
            .header(TEST_IP.0, TEST_IP.1)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(&[("name", "Soap")], &[])))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login");
    }
}
