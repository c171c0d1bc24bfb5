//! Provider kind enumeration and default model mapping.

use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::constants::DEFAULT_MODEL;

/// Identifies which LLM provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenRouter (multi-provider gateway).
    OpenRouter,
    /// OpenAI, or any endpoint speaking the same API when a base URL is set.
    OpenAI,
    /// Ollama (local models via OpenAI-compatible API).
    Ollama,
}

impl ProviderKind {
    /// Parses a provider name string into a [`ProviderKind`].
    ///
    /// Matching is case-insensitive. Returns an error for unknown providers.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" => Ok(Self::OpenRouter),
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(anyhow!(
                "Unknown provider: {other}. Supported: openrouter, openai, ollama"
            )),
        }
    }

    /// Lowercase name used for config sections and `<NAME>_API_KEY` variables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::OpenAI => "openai",
            Self::Ollama => "ollama",
        }
    }

    /// Returns the default model identifier for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenRouter => DEFAULT_MODEL,
            Self::OpenAI => crate::constants::DEFAULT_OPENAI_MODEL,
            Self::Ollama => crate::constants::OLLAMA_DEFAULT_MODEL,
        }
    }

    /// Picks the model: provider entry override, then the global `model`
    /// unless it is still the built-in default, then this provider's default.
    pub fn model_from(&self, config: &Config) -> String {
        let model = config.model_for(self.name());
        if model == DEFAULT_MODEL {
            self.default_model().to_string()
        } else {
            model.to_string()
        }
    }
}
