//! Gemini `generateContent` client
//!
//! The transport requires the `ai` feature:
//! ```toml
//! plainspeak = { version = "0.3", features = ["ai"] }
//! ```

use super::{ProviderError, ResponseSource};
use crate::config::ProviderConfig;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Blocking client for one model
#[cfg_attr(not(feature = "ai"), allow(dead_code))]
pub struct GeminiClient {
    api_key: String,
    settings: ProviderConfig,
}

impl GeminiClient {
    /// Client with default settings and the key from `GEMINI_API_KEY`
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_config(&ProviderConfig::default())
    }

    /// Client from config; a key in config wins over the environment
    pub fn from_config(settings: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = match settings.api_key.clone() {
            Some(key) if !key.is_empty() => key,
            _ => std::env::var(API_KEY_VAR).map_err(|_| ProviderError::NoApiKey)?,
        };

        Ok(Self {
            api_key,
            settings: settings.clone(),
        })
    }

    /// Set the model to use
    pub fn model(mut self, model: &str) -> Self {
        self.settings.model = model.to_string();
        self
    }

    /// `{base_url}/models/{model}:generateContent`, without the key
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Send one prompt and return the generated text
    #[cfg(feature = "ai")]
    pub fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        use std::time::Duration;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.settings.timeout_secs))
            .build()
            .map_err(transport_error)?;

        let body = super::request_body(
            prompt,
            self.settings.temperature,
            self.settings.max_output_tokens,
        );

        tracing::debug!(endpoint = %self.endpoint(), "sending generateContent request");

        let response = client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| ProviderError::Parse(e.without_url().to_string()))?;

        super::extract_text(&json)
    }

    /// Stub implementation when ai feature is disabled
    #[cfg(not(feature = "ai"))]
    pub fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Disabled)
    }
}

impl ResponseSource for GeminiClient {
    fn respond(&self, prompt: &str) -> Result<String, ProviderError> {
        self.generate(prompt)
    }
}

/// The request URL carries the API key, so it never reaches the message
#[cfg(feature = "ai")]
fn transport_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport(err.without_url().to_string())
}

/// Check if the AI feature is available
pub fn is_ai_available() -> bool {
    cfg!(feature = "ai")
}
