//! Gemini text-generation collaborator.
//!
//! One opaque operation: prompt in, generated text out. Blocked or
//! empty generations surface as typed errors, and there is no retry.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::error::GeminiError;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// An opaque text-completion service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError>;
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Build a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(GeminiError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request_body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "topP": 1,
                "topK": 1,
                "maxOutputTokens": 5000,
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(GeminiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await.map_err(GeminiError::Request)?;

        if let Some(reason) = json
            .pointer("/promptFeedback/blockReason")
            .and_then(Value::as_str)
        {
            return Err(GeminiError::Blocked {
                reason: reason.to_string(),
            });
        }

        let text = json
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or(GeminiError::EmptyResponse)?;

        Ok(text.to_string())
    }
}

/// Call the generator, retaining the offending prompt on disk when the
/// generation fails.
pub async fn run_generation(
    generator: &dyn TextGenerator,
    prompt: &str,
    debug_dir: &Path,
) -> Result<String, GeminiError> {
    match generator.generate(prompt).await {
        Ok(text) => Ok(text),
        Err(e) => {
            match crate::output::write_debug_prompt(debug_dir, prompt) {
                Ok(path) => warn!("Generation failed; the prompt was saved to {}", path.display()),
                Err(io) => warn!("Could not save the failing prompt: {io}"),
            }
            Err(e)
        }
    }
}
