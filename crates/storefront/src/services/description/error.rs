//! Description writer errors.

use thiserror::Error;

/// Errors from writing a product description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// No product name to describe.
    #[error("Please enter a product name first!")]
    MissingName,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Too many requests for the API key's quota.
    #[error("rate limited by the language model API")]
    RateLimited,

    /// The API key was rejected.
    #[error("language model API key rejected")]
    Unauthorized,

    /// The model answered without any text.
    #[error("empty response from language model")]
    EmptyResponse,

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}
