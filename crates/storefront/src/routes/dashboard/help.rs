//! Help bot chat.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use super::current_shop;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireSeller;
use crate::models::Shop;
use crate::services::help_bot::{GREETING, HelpAnswer, HelpTopic};
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard/help.html")]
pub struct HelpTemplate {
    pub shop: Shop,
    pub greeting: &'static str,
    pub topics: [HelpTopic; 4],
    /// The picked topic and the bot's reply.
    pub exchange: Option<(HelpTopic, HelpAnswer)>,
}

/// Opening message and topic menu.
pub async fn chat(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<HelpTemplate> {
    Ok(HelpTemplate {
        shop: current_shop(&state, &seller).await?,
        greeting: GREETING,
        topics: HelpTopic::ALL,
        exchange: None,
    })
}

/// The bot's answer to a topic. Unknown topics are 404.
pub async fn answer(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(topic): Path<String>,
) -> Result<HelpTemplate> {
    let topic = HelpTopic::from_slug(&topic).ok_or(AppError::NotFound(topic))?;
    let reply = topic.answer(&state.config().support_whatsapp);

    Ok(HelpTemplate {
        shop: current_shop(&state, &seller).await?,
        greeting: GREETING,
        topics: HelpTopic::ALL,
        exchange: Some((topic, reply)),
    })
}
