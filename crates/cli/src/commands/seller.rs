//! Seller management.

use sanndikaa_storefront::services::{AuthError, AuthService, RegisterSeller};

use super::{CommandError, connect};

#[derive(Debug, thiserror::Error)]
pub enum SellerError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Register a seller with their shop, as the sign-up form does.
pub async fn create(
    email: &str,
    password: &str,
    shop_name: &str,
    whatsapp: &str,
) -> Result<(), SellerError> {
    let pool = connect().await?;

    let (seller, shop) = AuthService::new(&pool)
        .register(RegisterSeller {
            email,
            password,
            shop_name,
            whatsapp,
        })
        .await?;

    tracing::info!(
        seller_id = %seller.id,
        shop_id = %shop.id,
        slug = %shop.slug,
        "Seller created"
    );
    Ok(())
}
