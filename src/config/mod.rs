//! Configuration for weather-agent.
//!
//! Settings are stored as TOML at the platform's XDG config path
//! (e.g. `~/.config/weather-agent/config.toml` on Linux), optionally
//! overridden by a `weather-agent.toml` in the current project.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;
#[cfg(test)]
pub(crate) use types::ProviderEntry;

use anyhow::Result;

impl Config {
    /// Load config with precedence: project > global > defaults.
    /// Creates default config file if none exists.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions();
        Ok(config)
    }
}
