//! Text-generation provider: prompt construction and the Gemini client

pub mod gemini;
pub mod prompt;

pub use gemini::{is_ai_available, GeminiClient};
pub use prompt::{build_prompt, extract_text, request_body, DEFAULT_SYSTEM_PROMPT};

use thiserror::Error;

/// Failure while obtaining a response for one prompt
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("GEMINI_API_KEY environment variable not set")]
    NoApiKey,
    #[error("Request error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Response parsing error: {0}")]
    Parse(String),
    #[error("AI feature not enabled. Rebuild with: cargo build --features ai")]
    Disabled,
}

/// Anything that turns a prompt into response text
pub trait ResponseSource {
    fn respond(&self, prompt: &str) -> Result<String, ProviderError>;
}

impl<F> ResponseSource for F
where
    F: Fn(&str) -> Result<String, ProviderError>,
{
    fn respond(&self, prompt: &str) -> Result<String, ProviderError> {
        self(prompt)
    }
}
