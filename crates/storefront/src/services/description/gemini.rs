//! Gemini `generateContent` client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;

use super::DescriptionError;
use crate::config::GeminiConfig;

/// Gemini REST base URL.
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Language model description writer.
#[derive(Clone)]
pub struct GeminiWriter {
    client: reqwest::Client,
    model: String,
}

impl GeminiWriter {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, DescriptionError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| DescriptionError::Parse(format!("Invalid API key format: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// Ask the model for a description of `name`.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited` or `Unauthorized` for 429 and 401/403 answers,
    /// `Api` for other failures and `EmptyResponse` when no text comes back.
    pub async fn write(&self, name: &str) -> Result<String, DescriptionError> {
        let url = format!("{BASE_URL}/{}:generateContent", self.model);
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt(name) }]
            }]
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        match status {
            StatusCode::TOO_MANY_REQUESTS => return Err(DescriptionError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DescriptionError::Unauthorized);
            }
            s if !s.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(DescriptionError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DescriptionError::Parse(e.to_string()))?;

        extract_text(parsed)
    }
}

fn prompt(name: &str) -> String {
    format!(
        "Write a short, catchy product description (max 2 sentences) for a product named \
         \"{name}\". Use emojis. Make it sound exciting for a customer in The Gambia."
    )
}

fn extract_text(response: GenerateContentResponse) -> Result<String, DescriptionError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(DescriptionError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_quotes_name() {
        let p = prompt("Wonjo Juice");
        assert!(p.contains("named \"Wonjo Juice\""));
        assert!(p.ends_with("customer in The Gambia."));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Fresh " }, { "text": "and tasty! 🍹\n" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Fresh and tasty! 🍹");
    }

    #[test]
    fn test_extract_text_empty() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(DescriptionError::EmptyResponse)
        ));

        let blocked: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(matches!(
            extract_text(blocked),
            Err(DescriptionError::EmptyResponse)
        ));
    }
}
