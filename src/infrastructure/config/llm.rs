//! Audit model configuration.
//!
//! The API key is never stored in the config file. It is read from
//! `OPENAI_API_KEY` when an audit is requested.

use serde::{Deserialize, Serialize};

/// OpenAI settings for the forensic audit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Chat Completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier.
    ///
    /// Defaults to "gpt-4o".
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for generation.
    ///
    /// Lower values produce more deterministic output.
    /// Defaults to 0.2.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response. Defaults to 4096.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".into()
}

fn default_model() -> String {
    "gpt-4o".into()
}

fn default_temperature() -> f64 {
    0.2
}

const fn default_max_tokens() -> usize {
    4096
}

const fn default_timeout_secs() -> u64 {
    120
}
