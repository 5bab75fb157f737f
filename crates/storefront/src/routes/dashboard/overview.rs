//! Dashboard overview: inventory figures and the product table.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use super::current_shop;
use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::{InventoryStats, Product, Shop};
use crate::routes::MessageQuery;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/overview.html")]
pub struct OverviewTemplate {
    pub shop: Shop,
    pub shop_url: String,
    pub stats: InventoryStats,
    pub products: Vec<Product>,
    pub success: Option<&'static str>,
}

#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn overview(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Query(query): Query<MessageQuery>,
) -> Result<OverviewTemplate> {
    let shop = current_shop(&state, &seller).await?;
    let products = ProductRepository::new(state.pool());
    let stats = products.inventory_stats(shop.id).await?;
    let products = products.list_for_shop(shop.id).await?;

    Ok(OverviewTemplate {
        shop_url: state.config().absolute_url(&shop.path()),
        shop,
        stats,
        products,
        success: query.success_message(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sanndikaa_core::{Category, Dalasi, ProductId};

    use super::*;
    use crate::models::shop::tests::sample_shop;

    #[test]
    fn test_overview_renders_stats() {
        let shop = sample_shop();
        let product = Product {
            id: ProductId::new(1),
            shop_id: shop.id,
            name: "Shea Butter".to_string(),
            price: Dalasi::parse("120").unwrap(),
            category: Category::Beauty,
            description: None,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let html = OverviewTemplate {
            shop_url: "http://localhost:3000/shop/awa-s-kitchen-42".to_string(),
            shop,
            stats: InventoryStats::new(3, Dalasi::parse("350").unwrap()),
            products: vec![product],
            success: None,
        }
        .render()
        .unwrap();

        assert!(html.contains("Total Products"));
        assert!(html.contains("Inventory Value"));
        assert!(html.contains("D350"));
        assert!(html.contains("Avg. Price"));
        assert!(html.contains("D117"));
        assert!(html.contains("Shea Butter"));
    }
}
