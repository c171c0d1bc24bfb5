//! File loading and merging for weather-agent configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{default_model, Config, ProviderConfig};
use crate::constants::{DEFAULT_MAX_TURNS, DEFAULT_PROVIDER, PROJECT_CONFIG_FILENAME};

/// Written on first run so users have a file to edit.
fn default_toml() -> String {
    format!(
        r#"model = "{}"
default_provider = "{}"
max_turns = {}

[provider.openrouter]
api_key = "{{env:OPENROUTER_API_KEY}}"
base_url = "{}"

[provider.openai]
api_key = "{{env:OPENAI_API_KEY}}"

[provider.ollama]
base_url = "{}"
"#,
        default_model(),
        DEFAULT_PROVIDER,
        DEFAULT_MAX_TURNS,
        crate::constants::OPENROUTER_DEFAULT_BASE_URL,
        crate::constants::OLLAMA_DEFAULT_BASE_URL,
    )
}

impl Config {
    /// Loads the global config from `~/.config/weather-agent/config.toml`,
    /// creating it with defaults when missing.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let contents = default_toml();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &contents)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            tracing::info!("Created default config at {}", path.display());
            return toml::from_str(&contents).context("Failed to parse default config");
        }
        Self::from_path(&path)
    }

    /// Parses a config file.
    pub(super) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    /// Look for weather-agent.toml in the current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        Self::load_project_from(&std::env::current_dir()?)
    }

    pub(super) fn load_project_from(start: &Path) -> Result<Option<Config>> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Self::from_path(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Merge project config over global config.
    /// Project values win when they differ from the built-in defaults.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        let defaults = Config::default();
        Config {
            model: if project.model != defaults.model {
                project.model
            } else {
                global.model
            },
            default_provider: if project.default_provider != defaults.default_provider {
                project.default_provider
            } else {
                global.default_provider
            },
            system_prompt: project.system_prompt.or(global.system_prompt),
            max_turns: if project.max_turns != defaults.max_turns {
                project.max_turns
            } else {
                global.max_turns
            },
            provider: ProviderConfig {
                openrouter: project.provider.openrouter.or(global.provider.openrouter),
                openai: project.provider.openai.or(global.provider.openai),
                ollama: project.provider.ollama.or(global.provider.ollama),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ProviderEntry;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "weather_agent_test_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_toml_parses() {
        let config: Config = toml::from_str(&default_toml()).unwrap();
        assert_eq!(config.model, "mistralai/mistral-7b-instruct");
        assert_eq!(config.default_provider, "openrouter");
        assert_eq!(config.max_turns, 10);
        let openrouter = config.provider.openrouter.unwrap();
        assert_eq!(
            openrouter.api_key.as_deref(),
            Some("{env:OPENROUTER_API_KEY}")
        );
        assert_eq!(
            openrouter.base_url.as_deref(),
            Some("https://openrouter.ai/api/v1")
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_project_config_found_in_parent() {
        let root = temp_dir("project_parent");
        fs::create_dir_all(root.join(".git")).unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.join(PROJECT_CONFIG_FILENAME),
            "model = \"openai/gpt-4o-mini\"\n",
        )
        .unwrap();

        let found = Config::load_project_from(&nested).unwrap().unwrap();
        assert_eq!(found.model, "openai/gpt-4o-mini");

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_project_search_stops_at_git_root() {
        let root = temp_dir("project_git_stop");
        let repo = root.join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::write(root.join(PROJECT_CONFIG_FILENAME), "max_turns = 3\n").unwrap();

        assert!(Config::load_project_from(&repo).unwrap().is_none());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_invalid_project_config_is_error() {
        let root = temp_dir("project_invalid");
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(PROJECT_CONFIG_FILENAME), "max_turns = \"lots\"\n").unwrap();

        assert!(Config::load_project_from(&root).is_err());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_merge_project_wins() {
        let mut global = Config::default();
        global.model = "global-model".into();
        global.system_prompt = Some("global prompt".into());
        global.provider.openai = Some(ProviderEntry {
            api_key: Some("global-key".into()),
            ..Default::default()
        });

        let mut project = Config::default();
        project.max_turns = 2;
        project.provider.ollama = Some(ProviderEntry {
            base_url: Some("http://gpu-box:11434".into()),
            ..Default::default()
        });

        let merged = Config::merge(global, project);
        assert_eq!(merged.model, "global-model");
        assert_eq!(merged.max_turns, 2);
        assert_eq!(merged.system_prompt.as_deref(), Some("global prompt"));
        assert!(merged.provider.openai.is_some());
        assert_eq!(
            merged.provider.ollama.unwrap().base_url.as_deref(),
            Some("http://gpu-box:11434")
        );
    }
}
