//! Seller authentication extractors.
//!
//! Dashboard routes take a [`RequireSeller`]; pages that only change their
//! header for logged-in sellers take an [`OptionalSeller`].

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentSeller, session_keys};

/// Where sellers are sent when they need to log in.
pub const LOGIN_PATH: &str = "/auth/login";

/// Extractor that requires a logged-in seller.
///
/// If nobody is logged in, HTML requests are redirected to the login page and
/// `/api/` requests get a bare 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireSeller(seller): RequireSeller) -> impl IntoResponse {
///     format!("Hello, {}!", seller.email)
/// }
/// ```
pub struct RequireSeller(pub CurrentSeller);

/// Error returned when a seller session is required but missing.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireSeller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let seller: CurrentSeller = session
            .get(session_keys::CURRENT_SELLER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                if is_api_request(parts) {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(seller))
    }
}

/// Nested routers see a stripped URI, so look at the original one.
fn is_api_request(parts: &Parts) -> bool {
    parts
        .extensions
        .get::<OriginalUri>()
        .map_or(&parts.uri, |original| &original.0)
        .path()
        .starts_with("/api/")
}

/// Extractor that optionally gets the current seller.
pub struct OptionalSeller(pub Option<CurrentSeller>);

impl<S> FromRequestParts<S> for OptionalSeller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let seller = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentSeller>(session_keys::CURRENT_SELLER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(seller))
    }
}

/// Store the logged-in seller in the session.
///
/// The session ID is cycled first so a pre-login ID cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_seller(
    session: &Session,
    seller: &CurrentSeller,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_SELLER, seller).await
}

/// Log the seller out.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_seller(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
