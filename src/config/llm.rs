//! Language model configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Language model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Which text generator to use
    #[serde(default)]
    pub provider: LlmProvider,

    /// API key, required for `openai`
    pub api_key: Option<Secret<String>>,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature of the victim
    #[serde(default = "default_victim_temperature")]
    pub victim_temperature: f32,

    /// Sampling temperature of the event moderator
    #[serde(default = "default_moderator_temperature")]
    pub moderator_temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Text generator type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAI,
    /// Offline canned replies
    #[default]
    Mock,
}

impl LlmConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate language model configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == LlmProvider::OpenAI && !self.has_api_key() {
            return Err(ValidationError::MissingRequired("SCAM_SIM__LLM__API_KEY"));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        for (name, value) in [
            ("victim_temperature", self.victim_temperature),
            ("moderator_temperature", self.moderator_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ValidationError::InvalidTemperature { name, value });
            }
        }

        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            victim_temperature: default_victim_temperature(),
            moderator_temperature: default_moderator_temperature(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_victim_temperature() -> f32 {
    0.8
}

fn default_moderator_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    400
}
