//! Remote generative-language model
/// Gemini `generateContent` client
mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Request to the model endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode model response: {0}")]
    Decode(String),

    #[error("Model is unavailable: {0}")]
    Unavailable(String),
}

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends `prompt` as a single request and returns the generated text.
    ///
    /// # Errors
    /// Transport failures, non-success responses, or undecodable bodies.
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Stand-in used when no API key is configured. Every request fails.
#[derive(Debug, Clone)]
pub struct OfflineModel {
    /// Reported in every error
    reason: String,
}

impl OfflineModel {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl GenerativeModel for OfflineModel {
    async fn generate_content(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Unavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_model_always_fails() {
        let model = OfflineModel::new("GEMINI_API_KEY is not set");

        let result = model.generate_content("hello").await;

        assert!(matches!(
            result,
            Err(ModelError::Unavailable(reason)) if reason == "GEMINI_API_KEY is not set"
        ));
    }
}
