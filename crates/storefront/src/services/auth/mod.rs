//! Authentication service.
//!
//! Seller registration, password login and password resets.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::instrument;

use sanndikaa_core::{Email, SellerId, ShopSlug, WhatsAppNumber};

use crate::db::{
    EMAIL_TAKEN, RepositoryError, ResetTokenRepository, SellerRepository, ShopRepository,
};
use crate::models::{NewShop, Seller, Shop};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// How long a reset link stays valid.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Attempts at finding a free slug before giving up.
const SLUG_ATTEMPTS: usize = 5;

/// Hash checked against when a login names an unknown email.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("sanndikaa-unknown-seller").ok());

/// Registration form input.
#[derive(Debug, Clone, Copy)]
pub struct RegisterSeller<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub shop_name: &'a str,
    pub whatsapp: &'a str,
}

/// Authentication service.
pub struct AuthService<'a> {
    sellers: SellerRepository<'a>,
    shops: ShopRepository<'a>,
    reset_tokens: ResetTokenRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            sellers: SellerRepository::new(pool),
            shops: ShopRepository::new(pool),
            reset_tokens: ResetTokenRepository::new(pool),
        }
    }

    /// Register a seller and open their shop.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `WeakPassword`, `InvalidShopName` or
    /// `InvalidWhatsApp` for bad input, and `AuthError::EmailTaken` if the
    /// email is already registered.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterSeller<'_>) -> Result<(Seller, Shop), AuthError> {
        let email = Email::parse(input.email)?;
        validate_password(input.password)?;
        let shop_name = input.shop_name.trim();
        if shop_name.is_empty() {
            return Err(AuthError::InvalidShopName);
        }
        let whatsapp_number = WhatsAppNumber::parse(input.whatsapp)?;

        let password_hash = hash_password(input.password)?;
        let slug = self.free_slug(shop_name).await?;

        let shop = NewShop {
            name: shop_name.to_string(),
            slug,
            whatsapp_number,
        };

        let created = self
            .sellers
            .create_with_shop(&email, &password_hash, &shop)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(ref msg) if msg == EMAIL_TAKEN => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(seller_id = %created.0.id, slug = %created.1.slug, "Seller registered");
        Ok(created)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Seller, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some((seller, password_hash)) = self.sellers.get_password_hash(&email).await? else {
            // Same Argon2 work as a known email, so timing does not reveal accounts.
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, hash);
            }
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        Ok(seller)
    }

    /// Create a reset token for `email`.
    ///
    /// Returns `None` for unknown emails. Callers must respond the same way in
    /// both cases so accounts cannot be enumerated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email does not parse.
    #[instrument(skip(self))]
    pub async fn request_password_reset(
        &self,
        email: &str,
    ) -> Result<Option<(Seller, String)>, AuthError> {
        let email = Email::parse(email)?;
        let Some(seller) = self.sellers.get_by_email(&email).await? else {
            return Ok(None);
        };

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        self.reset_tokens
            .create(seller.id, &hash_token(&token), expires_at)
            .await?;

        Ok(Some((seller, token)))
    }

    /// Set a new password using a reset token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` or `AuthError::InvalidResetToken`.
    #[instrument(skip_all)]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<SellerId, AuthError> {
        validate_password(new_password)?;
        let seller_id = self
            .reset_tokens
            .consume(&hash_token(token))
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let password_hash = hash_password(new_password)?;
        self.sellers.update_password(seller_id, &password_hash).await?;
        tracing::info!(seller_id = %seller_id, "Password reset");
        Ok(seller_id)
    }

    /// Change the password of a logged-in seller.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the new password is too short.
    #[instrument(skip(self, new_password))]
    pub async fn change_password(
        &self,
        seller_id: SellerId,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;
        let password_hash = hash_password(new_password)?;
        self.sellers.update_password(seller_id, &password_hash).await?;
        Ok(())
    }

    /// Pick a random-suffixed slug that is not taken yet.
    async fn free_slug(&self, shop_name: &str) -> Result<ShopSlug, AuthError> {
        for _ in 0..SLUG_ATTEMPTS {
            let slug = ShopSlug::from_name(shop_name, rand::random_range(0..1000));
            if !self.shops.slug_exists(&slug).await? {
                return Ok(slug);
            }
        }
        Err(AuthError::Repository(RepositoryError::Conflict(
            crate::db::SLUG_TAKEN.to_owned(),
        )))
    }
}

/// Validate password meets requirements.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// 32 random bytes, URL-safe base64.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hex SHA-256 of a reset token, as stored in the database.
fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_min_length() {
        assert!(matches!(
            validate_password("12345"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("jollof-rice").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("jollof-rice", &hash).is_ok());
        assert!(matches!(
            verify_password("domoda", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_is_real_argon2() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordHash::new(hash).is_ok());
        assert!(matches!(
            verify_password("jollof-rice", hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-hash"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_generate_token_is_url_safe_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let h = hash_token("abc");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_token("abc"));
        assert_ne!(h, hash_token("abd"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::EmailTaken.code(), "exists");
        assert_eq!(AuthError::InvalidCredentials.code(), "credentials");
        assert_eq!(AuthError::PasswordHash.code(), "server");
    }
}
