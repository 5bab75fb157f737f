//! Orders placed through the quick shop and the API.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use sanndikaa_core::OrderId;

use super::current_shop;
use crate::db::OrderRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::{Order, Shop};
use crate::routes::{MessageQuery, redirect_with_error};
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/orders.html")]
pub struct OrdersTemplate {
    pub shop: Shop,
    pub orders: Vec<Order>,
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Orders, newest first.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Query(query): Query<MessageQuery>,
) -> Result<OrdersTemplate> {
    let shop = current_shop(&state, &seller).await?;
    let orders = OrderRepository::new(state.pool())
        .list_for_shop(shop.id)
        .await?;

    Ok(OrdersTemplate {
        shop,
        orders,
        error: query.error_message(),
        success: query.success_message(),
    })
}

/// Mark an order completed.
#[instrument(skip(state, seller), fields(seller_id = %seller.id))]
pub async fn complete(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
) -> Result<Response> {
    let Ok(id) = id.parse::<i32>().map(OrderId::new) else {
        return Ok(redirect_with_error("/dashboard/orders", "not_found"));
    };

    let found = OrderRepository::new(state.pool())
        .mark_completed(id, seller.shop_id)
        .await?;

    Ok(if found {
        Redirect::to("/dashboard/orders?success=order_completed").into_response()
    } else {
        redirect_with_error("/dashboard/orders", "not_found")
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use sanndikaa_core::{Dalasi, OrderStatus};

    use super::*;
    use crate::models::shop::tests::sample_shop;

    #[test]
    fn test_orders_show_complete_button_for_new_orders_only() {
        let shop = sample_shop();
        let order = |id, status| Order {
            id: OrderId::new(id),
            shop_id: Some(shop.id),
            product_id: None,
            product_name: format!("Item {id}"),
            price: Dalasi::parse("10").unwrap(),
            status,
            created_at: Utc::now(),
        };
        let html = OrdersTemplate {
            orders: vec![order(1, OrderStatus::New), order(2, OrderStatus::Completed)],
            shop,
            error: None,
            success: Some("Order marked as completed."),
        }
        .render()
        .unwrap();

        assert!(html.contains("action=\"/dashboard/orders/1/complete\""));
        assert!(!html.contains("action=\"/dashboard/orders/2/complete\""));
        assert!(html.contains("Order marked as completed."));
    }
}
