//! Demo data for local development.

use sanndikaa_storefront::db::{ProductRepository, RepositoryError};
use sanndikaa_storefront::models::{NewProduct, ProductInputError};
use sanndikaa_storefront::services::{AuthError, AuthService, RegisterSeller};

use super::{CommandError, connect};

const DEMO_EMAIL: &str = "demo@sanndikaa.gm";
const DEMO_PASSWORD: &str = "sanndikaa";

/// Name, price, category, description.
const DEMO_PRODUCTS: &[(&str, &str, &str, &str)] = &[
    (
        "Baobab Juice",
        "150",
        "Food",
        "Fresh baobab juice, made every morning. Chilled and ready to drink.",
    ),
    (
        "Wonjo Syrup",
        "200",
        "Food",
        "Hibiscus syrup from Serrekunda. Mix one part with four parts water.",
    ),
    (
        "Ankara Kaftan",
        "1200",
        "Fashion",
        "Hand-tailored kaftan in bright Ankara print. One size fits most.",
    ),
    (
        "Shea Butter",
        "350",
        "Beauty",
        "Unrefined shea butter for skin and hair. 250g jar.",
    ),
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Invalid demo product: {0}")]
    Product(#[from] ProductInputError),
}

/// Create the demo seller, shop and products.
///
/// Does nothing if the demo seller already exists.
pub async fn demo() -> Result<(), SeedError> {
    let pool = connect().await?;

    let registered = AuthService::new(&pool)
        .register(RegisterSeller {
            email: DEMO_EMAIL,
            password: DEMO_PASSWORD,
            shop_name: "Awa's Kitchen",
            whatsapp: "7001122",
        })
        .await;

    let shop = match registered {
        Ok((_, shop)) => shop,
        Err(AuthError::EmailTaken) => {
            tracing::info!(email = DEMO_EMAIL, "Demo seller already exists, skipping");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let products = ProductRepository::new(&pool);
    for (name, price, category, description) in DEMO_PRODUCTS {
        let product = NewProduct::from_input(name, price, category, Some(*description))?;
        products.create(shop.id, &product).await?;
    }

    tracing::info!(
        slug = %shop.slug,
        products = DEMO_PRODUCTS.len(),
        email = DEMO_EMAIL,
        password = DEMO_PASSWORD,
        "Demo shop seeded"
    );
    Ok(())
}
