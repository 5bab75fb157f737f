//! Lead analytics.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::current_shop;
use crate::db::LeadRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::{Lead, LeadSummary, Shop};
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/analytics.html")]
pub struct AnalyticsTemplate {
    pub shop: Shop,
    pub summary: LeadSummary,
    pub leads: Vec<Lead>,
}

/// Leads table with total count and potential revenue.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn analytics(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<AnalyticsTemplate> {
    let shop = current_shop(&state, &seller).await?;
    let leads = LeadRepository::new(state.pool());
    let summary = leads.summary(shop.id).await?;
    let leads = leads.list_for_shop(shop.id).await?;

    Ok(AnalyticsTemplate {
        shop,
        summary,
        leads,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sanndikaa_core::{Dalasi, LeadId, PaymentMethod, ProductId};

    use super::*;
    use crate::models::shop::tests::sample_shop;

    #[test]
    fn test_empty_analytics() {
        let html = AnalyticsTemplate {
            shop: sample_shop(),
            summary: LeadSummary {
                total_leads: 0,
                potential_revenue: Dalasi::ZERO,
            },
            leads: Vec::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Track your customer interest and potential sales."));
        assert!(html.contains("No leads yet. Share your shop link!"));
    }

    #[test]
    fn test_leads_table() {
        let shop = sample_shop();
        let lead = Lead {
            id: LeadId::new(1),
            shop_id: shop.id,
            product_id: Some(ProductId::new(2)),
            product_name: "Kaftan".to_string(),
            product_price: Dalasi::parse("1200").unwrap(),
            payment_method: PaymentMethod::Wave,
            created_at: Utc::now(),
        };
        let html = AnalyticsTemplate {
            shop,
            summary: LeadSummary {
                total_leads: 1,
                potential_revenue: Dalasi::parse("1200").unwrap(),
            },
            leads: vec![lead],
        }
        .render()
        .unwrap();
        assert!(html.contains("Kaftan"));
        assert!(html.contains("Wave / Sadam"));
        assert!(html.contains("D1200"));
        assert!(!html.contains("No leads yet"));
    }
}
