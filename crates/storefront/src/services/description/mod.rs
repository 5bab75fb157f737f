//! Product description writing ("Magic Write").
//!
//! [`DescriptionService`] asks the language model when one is configured and
//! falls back to the [`TemplateWriter`] on any failure, so sellers always get
//! a usable paragraph.

mod error;
mod gemini;
mod template;

pub use error::DescriptionError;
pub use gemini::GeminiWriter;
pub use template::TemplateWriter;

use sanndikaa_core::Category;
use tracing::instrument;

use crate::config::GeminiConfig;

/// Writes product descriptions.
#[derive(Clone)]
pub struct DescriptionService {
    template: TemplateWriter,
    gemini: Option<GeminiWriter>,
}

impl DescriptionService {
    /// Build the service, enabling Gemini when configured.
    ///
    /// # Errors
    ///
    /// Returns error if the Gemini client cannot be built.
    pub fn new(gemini: Option<&GeminiConfig>) -> Result<Self, DescriptionError> {
        Ok(Self {
            template: TemplateWriter,
            gemini: gemini.map(GeminiWriter::new).transpose()?,
        })
    }

    /// Template-only service.
    #[must_use]
    pub const fn template_only() -> Self {
        Self {
            template: TemplateWriter,
            gemini: None,
        }
    }

    /// Whether a language model is configured.
    #[must_use]
    pub const fn uses_llm(&self) -> bool {
        self.gemini.is_some()
    }

    /// Describe a product.
    ///
    /// # Errors
    ///
    /// Returns `DescriptionError::MissingName` when `name` is blank. Model
    /// failures never surface; they are logged and the template is used.
    #[instrument(skip(self))]
    pub async fn describe(&self, name: &str, category: Category) -> Result<String, DescriptionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DescriptionError::MissingName);
        }

        if let Some(gemini) = &self.gemini {
            match gemini.write(name).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!(error = %e, "Language model failed, using template writer");
                }
            }
        }

        Ok(self.template.write(name, category))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_describe_rejects_blank_name() {
        let service = DescriptionService::template_only();
        let err = service.describe("   ", Category::Food).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a product name first!");
    }

    #[tokio::test]
    async fn test_describe_without_llm_uses_template() {
        let service = DescriptionService::new(None).unwrap();
        assert!(!service.uses_llm());
        let text = service
            .describe(" Shea Lotion ", Category::Beauty)
            .await
            .unwrap();
        assert!(text.starts_with("Nourish your skin with our premium Shea Lotion."));
    }
}
