//! Change password while logged in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::current_shop;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::Shop;
use crate::routes::{MessageQuery, redirect_with_error};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

const BACK: &str = "/dashboard/password";

#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/password.html")]
pub struct PasswordTemplate {
    pub shop: Shop,
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

pub async fn show(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Query(query): Query<MessageQuery>,
) -> Result<PasswordTemplate> {
    Ok(PasswordTemplate {
        shop: current_shop(&state, &seller).await?,
        error: query.error_message(),
        success: query.success_message(),
    })
}

/// Check the current password, then store the new one.
#[instrument(skip_all, fields(seller_id = %seller.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Form(form): Form<ChangePasswordForm>,
) -> Response {
    if form.password != form.password_confirm {
        return redirect_with_error(BACK, "password_mismatch");
    }

    let auth = AuthService::new(state.pool());
    if let Err(e) = auth
        .login(seller.email.as_str(), &form.current_password)
        .await
    {
        tracing::warn!(error = %e, "Password change with wrong current password");
        return redirect_with_error(BACK, e.code());
    }

    match auth.change_password(seller.id, &form.password).await {
        Ok(()) => Redirect::to("/dashboard/password?success=password_changed").into_response(),
        Err(e) => {
            if matches!(e, AuthError::Repository(_) | AuthError::PasswordHash) {
                tracing::error!(error = %e, "Password change failed");
            }
            redirect_with_error(BACK, e.code())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::shop::tests::sample_shop;

    #[test]
    fn test_password_page() {
        let html = PasswordTemplate {
            shop: sample_shop(),
            error: Some("Passwords do not match."),
            success: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("name=\"current_password\""));
        assert!(html.contains("Passwords do not match."));
    }
}
