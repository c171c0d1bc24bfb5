//! Struct definitions and serde defaults for weather-agent configuration.

use serde::{Deserialize, Serialize};

/// Root configuration, deserialized from `config.toml`.
///
/// Fields use serde defaults so the agent runs with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Default model identifier (e.g. `"mistralai/mistral-7b-instruct"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Provider name (`"openrouter"`, `"openai"` or `"ollama"`).
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Optional system prompt handed to the engine as its preamble.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tool-calling round trips per query.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

fn default_provider() -> String {
    crate::constants::DEFAULT_PROVIDER.to_string()
}

fn default_max_turns() -> usize {
    crate::constants::DEFAULT_MAX_TURNS
}

/// Provider-specific configuration map.
///
/// Each field corresponds to a supported LLM provider. Only providers
/// the user has configured will be `Some`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub openrouter: Option<ProviderEntry>,
    pub openai: Option<ProviderEntry>,
    pub ollama: Option<ProviderEntry>,
}

/// Connection details for a single LLM provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API (useful for proxies or compatible endpoints).
    pub base_url: Option<String>,
    /// Model identifier to use with this provider, overriding the global default.
    pub model: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            default_provider: default_provider(),
            system_prompt: None,
            max_turns: default_max_turns(),
            provider: ProviderConfig::default(),
        }
    }
}
