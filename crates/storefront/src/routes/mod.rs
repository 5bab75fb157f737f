//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Marketplace (?q= search)
//!
//! # Auth
//! GET  /auth/register, POST           - Seller + shop registration
//! GET  /auth/login, POST              - Login
//! POST /auth/logout                   - Logout
//! GET  /auth/forgot-password, POST    - Request a reset link
//! GET  /auth/reset-password, POST     - Set a new password (?token=)
//!
//! # Buyers
//! GET  /shop/{slug}                   - Public shop page
//! GET  /product/{id}                  - Product page
//! POST /product/{id}/order            - Record lead, redirect to WhatsApp
//! GET  /product/{id}/share            - Redirect to WhatsApp share link
//! GET  /s/{slug}                      - Compact listing with quick order
//! POST /s/{slug}/order/{product_id}   - Record order, redirect to WhatsApp
//!
//! # Dashboard (seller session required)
//! GET  /dashboard                     - Overview
//! GET  /dashboard/products            - Inventory manager
//! GET  /dashboard/add-product, POST   - Create product (multipart)
//! GET  /dashboard/edit/{id}, POST     - Update product (multipart)
//! POST /dashboard/products/{id}/delete
//! POST /dashboard/products/describe   - Magic Write (JSON)
//! GET  /dashboard/orders              - Orders
//! POST /dashboard/orders/{id}/complete
//! GET  /dashboard/analytics           - Leads
//! GET  /dashboard/settings, POST      - Shop settings (multipart)
//! GET  /dashboard/share/{id}          - Poster studio
//! GET  /dashboard/help                - Help bot
//! GET  /dashboard/help/{topic}        - Help bot answer
//! GET  /dashboard/password, POST      - Change password
//!
//! # JSON API
//! POST   /api/orders                  - Record an order
//! POST   /api/products                - Create a product (seller session)
//! DELETE /api/products/{id}           - Delete a product (seller session)
//! POST   /api/generate-description    - Magic Write
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod home;
pub mod product;
pub mod quick_shop;
pub mod shop;

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::middleware::{auth_rate_limiter, order_rate_limiter};
use crate::state::AppState;

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl MessageQuery {
    /// Human readable error for the `?error=` code.
    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_deref().map(error_message)
    }

    /// Human readable notice for the `?success=` code.
    #[must_use]
    pub fn success_message(&self) -> Option<&'static str> {
        self.success.as_deref().map(success_message)
    }
}

/// Message shown for an `?error=` code.
#[must_use]
pub fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid email or password.",
        "email" => "Please enter a valid email address.",
        "exists" => "An account with this email already exists. Try logging in.",
        "password" => "Password must be at least 6 characters.",
        "password_mismatch" => "Passwords do not match.",
        "shop_name" => "Please enter a shop name.",
        "whatsapp" => "Please enter a valid WhatsApp number.",
        "token" => "This reset link is invalid or has expired. Request a new one.",
        "name" => "Please enter a product name first!",
        "price" => "Please enter a valid price.",
        "image_type" => "Images must be JPG, PNG, GIF, WebP or AVIF.",
        "image_size" => "That image is too large.",
        "server" => "We could not save your changes. Please try again.",
        "upload" => "Could not read the upload. Please try again.",
        "not_found" => "That item no longer exists.",
        "session" => "Your session could not be saved. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
}

/// Message shown for a `?success=` code.
#[must_use]
pub fn success_message(code: &str) -> &'static str {
    match code {
        "registered" => "Shop created! Log in to start selling.",
        "email_sent" => "If that email has an account, a reset link is on its way.",
        "password_reset" => "Password updated. You can log in now.",
        "password_changed" => "Password changed.",
        "settings" => "Shop settings updated successfully! 🏪",
        "product_added" => "Product added.",
        "product_updated" => "Product updated.",
        "product_deleted" => "Product deleted.",
        "order_completed" => "Order marked as completed.",
        _ => "Done.",
    }
}

/// Redirect back to a form with an error code (the user stays on the page).
#[must_use]
pub fn redirect_with_error(path: &str, code: &str) -> Response {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!("{path}{separator}error={code}")).into_response()
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    let limited = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route_layer(auth_rate_limiter());

    Router::new()
        .route("/login", get(auth::login_page))
        .route("/register", get(auth::register_page))
        .route("/forgot-password", get(auth::forgot_password_page))
        .route("/reset-password", get(auth::reset_password_page))
        .route("/logout", post(auth::logout))
        .merge(limited)
}

/// Create the buyer-facing routes router.
pub fn buyer_routes() -> Router<AppState> {
    let limited = Router::new()
        .route("/product/{id}/order", post(product::order))
        .route("/s/{slug}/order/{product_id}", post(quick_shop::order))
        .route_layer(order_rate_limiter());

    Router::new()
        .route("/", get(home::home))
        .route("/shop/{slug}", get(shop::show))
        .route("/product/{id}", get(product::show))
        .route("/product/{id}/share", get(product::share))
        .route("/s/{slug}", get(quick_shop::show))
        .merge(limited)
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    let limited = Router::new()
        .route("/orders", post(api::create_order))
        .route("/create-order", post(api::create_order))
        .route_layer(order_rate_limiter());

    Router::new()
        .route("/products", post(api::create_product))
        .route("/products/{id}", axum::routing::delete(api::delete_product))
        .route("/generate-description", post(api::generate_description))
        .merge(limited)
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(buyer_routes())
        .nest("/auth", auth_routes())
        .nest("/dashboard", dashboard::routes())
        .nest("/api", api_routes())
}
