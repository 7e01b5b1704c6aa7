use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    GenerativeModel,
    ModelError,
};
use crate::config::ModelSettings;

/// Client for the Gemini `models/{model}:generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    /// HTTP client
    http: reqwest::Client,
    /// Base URL, without trailing slash
    endpoint: String,
    /// Model name, e.g. `gemini-1.5-flash`
    model: String,
    /// Injected access key
    api_key: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// # Errors
    /// The HTTP client could not be built.
    pub fn new(settings: &ModelSettings, api_key: impl Into<String>) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: api_key.into(),
        })
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "generateContent returned an error status");
            return Err(ModelError::Status { status: status.as_u16(), body });
        }

        let decoded: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ModelError::Decode(e.to_string()))?;

        Ok(decoded.text())
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate. Empty when there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.iter().filter_map(|part| part.text.as_deref()).collect())
            .unwrap_or_default()
    }
}
