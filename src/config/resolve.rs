//! Environment variable substitution and per-provider lookups.

use super::types::{Config, ProviderEntry};

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        self.model = Self::resolve_str(&self.model);
        self.default_provider = Self::resolve_str(&self.default_provider);
        if let Some(ref mut sp) = self.system_prompt {
            *sp = Self::resolve_str(sp);
        }
        Self::resolve_provider_entry(&mut self.provider.openrouter);
        Self::resolve_provider_entry(&mut self.provider.openai);
        Self::resolve_provider_entry(&mut self.provider.ollama);
    }

    /// Resolves `{env:VAR}` patterns in a single provider entry.
    fn resolve_provider_entry(entry: &mut Option<ProviderEntry>) {
        if let Some(ref mut e) = entry {
            for field in [&mut e.api_key, &mut e.base_url, &mut e.model] {
                if let Some(value) = field {
                    *value = Self::resolve_str(value);
                }
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    /// Unset variables become empty strings.
    fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        while let Some(start) = result.find("{env:") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
            } else {
                break;
            }
        }
        result
    }

    /// The config entry for a provider name, if one is configured.
    pub fn provider_entry(&self, provider: &str) -> Option<&ProviderEntry> {
        match provider {
            "openrouter" => self.provider.openrouter.as_ref(),
            "openai" => self.provider.openai.as_ref(),
            "ollama" => self.provider.ollama.as_ref(),
            _ => None,
        }
    }

    /// Resolve API key for a provider: env var first, then config value.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        let env_key = format!("{}_API_KEY", provider.to_uppercase());
        if let Ok(val) = std::env::var(&env_key) {
            if !val.is_empty() {
                return Some(val);
            }
        }

        self.provider_entry(provider)
            .and_then(|e| e.api_key.clone())
            .filter(|k| !k.is_empty())
    }

    /// Custom base URL for a provider, if configured and non-empty.
    pub fn base_url(&self, provider: &str) -> Option<&str> {
        self.provider_entry(provider)
            .and_then(|e| e.base_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Model for a provider: the provider entry's override, else the global model.
    pub fn model_for(&self, provider: &str) -> &str {
        self.provider_entry(provider)
            .and_then(|e| e.model.as_deref())
            .filter(|m| !m.is_empty())
            .unwrap_or(self.model.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_str_substitutes_env() {
        std::env::set_var("WEATHER_AGENT_TEST_SUBST", "abc123");
        assert_eq!(
            Config::resolve_str("key-{env:WEATHER_AGENT_TEST_SUBST}-end"),
            "key-abc123-end"
        );
    }

    #[test]
    fn test_resolve_str_unset_var_is_empty() {
        assert_eq!(
            Config::resolve_str("{env:WEATHER_AGENT_TEST_DEFINITELY_UNSET}"),
            ""
        );
    }

    #[test]
    fn test_resolve_str_unterminated_is_left_alone() {
        assert_eq!(Config::resolve_str("{env:OOPS"), "{env:OOPS");
    }

    #[test]
    fn test_api_key_from_config_entry() {
        let mut config = Config::default();
        config.provider.ollama = Some(ProviderEntry {
            api_key: Some("from-config".into()),
            ..Default::default()
        });
        // OLLAMA_API_KEY is not expected to be set in the test environment.
        assert_eq!(config.resolve_api_key("ollama").as_deref(), Some("from-config"));
        assert_eq!(config.resolve_api_key("unknown-provider"), None);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let mut config = Config::default();
        config.provider.openai = Some(ProviderEntry {
            api_key: Some(String::new()),
            base_url: Some(String::new()),
            model: Some(String::new()),
        });
        assert_eq!(config.base_url("openai"), None);
        assert_eq!(config.model_for("openai"), "mistralai/mistral-7b-instruct");
    }

    #[test]
    fn test_model_for_prefers_provider_entry() {
        let mut config = Config::default();
        config.provider.ollama = Some(ProviderEntry {
            model: Some("qwen2.5".into()),
            ..Default::default()
        });
        assert_eq!(config.model_for("ollama"), "qwen2.5");
        assert_eq!(config.model_for("openrouter"), "mistralai/mistral-7b-instruct");
    }

    #[test]
    fn test_resolve_substitutions_covers_provider_entries() {
        std::env::set_var("WEATHER_AGENT_TEST_URL", "http://proxy.local/v1");
        let mut config = Config::default();
        config.provider.openrouter = Some(ProviderEntry {
            base_url: Some("{env:WEATHER_AGENT_TEST_URL}".into()),
            ..Default::default()
        });
        config.resolve_substitutions();
        assert_eq!(config.base_url("openrouter"), Some("http://proxy.local/v1"));
    }
}
