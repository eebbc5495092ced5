//! Config schema and deserialization

use crate::suite::{default_scenarios, Scenario};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PAUSE_MS: u64 = 1000;

/// Text-generation provider settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API root, without the `/models/...` suffix
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// API key; falls back to GEMINI_API_KEY when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_output_tokens: 1200,
            timeout_secs: 30,
            api_key: None,
        }
    }
}

/// Root config structure for .plainspeakrc.json
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Minimum score every input must reach (exit 1 if below). Default: none
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// File extensions picked up when walking a directory
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Provider settings for `plainspeak run`
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pause between scenario requests, in milliseconds
    #[serde(default)]
    pub pause_ms: Option<u64>,

    /// Replaces the built-in system prompt
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Scenarios for `plainspeak run`; empty means the built-in set
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: None,
            ignore: Vec::new(),
            extensions: default_extensions(),
            provider: ProviderConfig::default(),
            pause_ms: None,
            system_prompt: None,
            scenarios: Vec::new(),
        }
    }
}

impl Config {
    /// Merge with CLI overrides (CLI takes precedence)
    pub fn merge_with_cli(mut self, threshold: Option<u8>, pause_ms: Option<u64>) -> Self {
        if let Some(t) = threshold {
            self.threshold = Some(t);
        }
        if let Some(p) = pause_ms {
            self.pause_ms = Some(p);
        }
        self
    }

    /// Configured scenarios, or the built-in set
    pub fn scenarios(&self) -> Vec<Scenario> {
        if self.scenarios.is_empty() {
            default_scenarios()
        } else {
            self.scenarios.clone()
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms.unwrap_or(DEFAULT_PAUSE_MS))
    }

    /// Configured system prompt, or the built-in persona prompt
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(crate::provider::DEFAULT_SYSTEM_PROMPT)
    }

    /// Whether a file extension is analyzed during directory walks
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}
