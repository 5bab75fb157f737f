//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] sanndikaa_core::EmailError),

    /// Invalid credentials (wrong password or unknown seller).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Shop name is blank.
    #[error("shop name is required")]
    InvalidShopName,

    /// WhatsApp number does not parse.
    #[error("invalid whatsapp number: {0}")]
    InvalidWhatsApp(#[from] sanndikaa_core::PhoneError),

    /// Reset token is unknown, used or expired.
    #[error("invalid or expired reset token")]
    InvalidResetToken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Short code used in `?error=` redirects.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "email",
            Self::InvalidCredentials => "credentials",
            Self::EmailTaken => "exists",
            Self::WeakPassword(_) => "password",
            Self::InvalidShopName => "shop_name",
            Self::InvalidWhatsApp(_) => "whatsapp",
            Self::InvalidResetToken => "token",
            Self::Repository(_) | Self::PasswordHash => "server",
        }
    }
}
