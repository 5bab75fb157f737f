//! Marketplace home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalSeller;
use crate::models::{CurrentSeller, ProductWithShop};
use crate::state::AppState;

/// How many products the marketplace shows.
const MARKETPLACE_LIMIT: i64 = 60;

/// Longest search string we pass to the database.
const MAX_QUERY_LEN: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    fn term(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| q.char_indices().nth(MAX_QUERY_LEN).map_or(q, |(i, _)| &q[..i]))
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductWithShop>,
    pub query: String,
    pub seller: Option<CurrentSeller>,
}

/// Display the marketplace: every shop's products, newest first.
#[instrument(skip(state, seller))]
pub async fn home(
    State(state): State<AppState>,
    OptionalSeller(seller): OptionalSeller,
    Query(search): Query<SearchQuery>,
) -> Result<HomeTemplate> {
    let term = search.term();
    let products = ProductRepository::new(state.pool())
        .list_recent(MARKETPLACE_LIMIT, term)
        .await?;

    Ok(HomeTemplate {
        products,
        query: term.unwrap_or_default().to_string(),
        seller,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_trims_and_caps() {
        let blank = SearchQuery {
            q: Some("   ".to_string()),
        };
        assert_eq!(blank.term(), None);

        let padded = SearchQuery {
            q: Some("  honey ".to_string()),
        };
        assert_eq!(padded.term(), Some("honey"));

        let long = SearchQuery {
            q: Some("é".repeat(150)),
        };
        assert_eq!(long.term().map(|t| t.chars().count()), Some(MAX_QUERY_LEN));
    }
}
