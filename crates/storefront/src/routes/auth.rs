//! Authentication route handlers.
//!
//! Seller registration (which opens the shop), login, logout and password
//! resets by emailed link.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::{MessageQuery, redirect_with_error};
use crate::db::ShopRepository;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_seller, set_current_seller};
use crate::models::CurrentSeller;
use crate::services::{AuthError, AuthService, RegisterSeller};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub shop_name: String,
    pub whatsapp: String,
}

/// Forgot password form data.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

/// Reset password form data.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    pub token: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters of the reset link.
#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    pub token: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
}

/// Forgot password page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/forgot_password.html")]
pub struct ForgotPasswordTemplate {
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Reset password page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/reset_password.html")]
pub struct ResetPasswordTemplate {
    pub error: Option<&'static str>,
    pub token: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error_message(),
        success: query.success_message(),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let seller = match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(seller) => seller,
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            return redirect_with_error("/auth/login", e.code());
        }
    };

    let shop = match ShopRepository::new(state.pool()).get_by_seller(seller.id).await {
        Ok(Some(shop)) => shop,
        Ok(None) => {
            tracing::error!(seller_id = %seller.id, "Seller has no shop");
            return redirect_with_error("/auth/login", "server");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load shop at login");
            return redirect_with_error("/auth/login", "server");
        }
    };

    let current = CurrentSeller {
        id: seller.id,
        email: seller.email,
        shop_id: shop.id,
    };

    if let Err(e) = set_current_seller(&session, &current).await {
        tracing::error!("Failed to set session: {}", e);
        return redirect_with_error("/auth/login", "session");
    }

    set_sentry_user(&current.id, Some(current.email.as_str()));
    Redirect::to("/dashboard").into_response()
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_seller(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();
    Redirect::to("/auth/login").into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error_message(),
    }
}

/// Handle registration: creates the seller and their shop.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let input = RegisterSeller {
        email: &form.email,
        password: &form.password,
        shop_name: &form.shop_name,
        whatsapp: &form.whatsapp,
    };

    match AuthService::new(state.pool()).register(input).await {
        Ok(_) => Redirect::to("/auth/login?success=registered").into_response(),
        Err(e) => {
            if matches!(e, AuthError::Repository(_) | AuthError::PasswordHash) {
                tracing::error!(error = %e, "Registration failed");
            } else {
                tracing::warn!(error = %e, "Registration rejected");
            }
            redirect_with_error("/auth/register", e.code())
        }
    }
}

// =============================================================================
// Password Reset Routes
// =============================================================================

/// Display the forgot password page.
pub async fn forgot_password_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    ForgotPasswordTemplate {
        error: query.error_message(),
        success: query.success_message(),
    }
}

/// Handle forgot password form submission.
///
/// Unknown emails get the same response as known ones.
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    match AuthService::new(state.pool())
        .request_password_reset(&form.email)
        .await
    {
        Ok(Some((seller, token))) => {
            let reset_url = state.config().absolute_url(&format!(
                "/auth/reset-password?token={}",
                urlencoding::encode(&token)
            ));
            if let Err(e) = state
                .email()
                .send_password_reset(seller.email.as_str(), &reset_url)
                .await
            {
                tracing::error!(error = %e, "Failed to send password reset email");
            }
        }
        Ok(None) => {}
        Err(AuthError::InvalidEmail(_)) => {
            return redirect_with_error("/auth/forgot-password", "email");
        }
        Err(e) => {
            tracing::error!(error = %e, "Password reset request failed");
        }
    }

    Redirect::to("/auth/forgot-password?success=email_sent").into_response()
}

/// Display the reset password page.
pub async fn reset_password_page(Query(query): Query<ResetQuery>) -> Response {
    match query.token.filter(|t| !t.is_empty()) {
        Some(token) => ResetPasswordTemplate {
            error: query.error.as_deref().map(super::error_message),
            token,
        }
        .into_response(),
        None => redirect_with_error("/auth/forgot-password", "token"),
    }
}

/// Handle reset password form submission.
pub async fn reset_password(
    State(state): State<AppState>,
    Form(form): Form<ResetPasswordForm>,
) -> Response {
    let back = format!(
        "/auth/reset-password?token={}",
        urlencoding::encode(&form.token)
    );

    if form.password != form.password_confirm {
        return redirect_with_error(&back, "password_mismatch");
    }

    match AuthService::new(state.pool())
        .reset_password(&form.token, &form.password)
        .await
    {
        Ok(_) => Redirect::to("/auth/login?success=password_reset").into_response(),
        Err(AuthError::InvalidResetToken) => redirect_with_error("/auth/forgot-password", "token"),
        Err(e) => {
            tracing::warn!(error = %e, "Password reset failed");
            redirect_with_error(&back, e.code())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_support::{body_text, get, location, post_form};

    #[tokio::test]
    async fn test_login_page_shows_messages() {
        let response = get("/auth/login?error=credentials&success=registered").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Invalid email or password."));
        assert!(body.contains("Shop created! Log in to start selling."));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password_before_database() {
        let response = post_form(
            "/auth/register",
            "email=awa%40example.gm&password=123&shop_name=Awa&whatsapp=7001122",
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/register?error=password");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_whatsapp() {
        let response = post_form(
            "/auth/register",
            "email=awa%40example.gm&password=123456&shop_name=Awa&whatsapp=12",
        )
        .await;
        assert_eq!(location(&response), "/auth/register?error=whatsapp");
    }

    #[tokio::test]
    async fn test_forgot_password_rejects_invalid_email() {
        let response = post_form("/auth/forgot-password", "email=not-an-email").await;
        assert_eq!(location(&response), "/auth/forgot-password?error=email");
    }

    #[tokio::test]
    async fn test_reset_page_without_token_redirects() {
        let response = get("/auth/reset-password").await;
        assert_eq!(location(&response), "/auth/forgot-password?error=token");

        let response = get("/auth/reset-password?token=abc").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("value=\"abc\""));
    }

    #[tokio::test]
    async fn test_reset_password_mismatch() {
        let response = post_form(
            "/auth/reset-password",
            "token=abc&password=123456&password_confirm=654321",
        )
        .await;
        assert_eq!(
            location(&response),
            "/auth/reset-password?token=abc&error=password_mismatch"
        );
    }

    #[tokio::test]
    async fn test_logout_redirects_to_login() {
        let response = post_form("/auth/logout", "").await;
        assert_eq!(location(&response), "/auth/login");
    }
}
