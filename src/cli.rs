//! Command-line interface for weather-agent.
//!
//! There are no options of its own; clap supplies `--help` and `--version`.
//! Running the binary goes straight into the chat loop.

use anyhow::Result;
use clap::Parser;

use crate::{chat, config};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "weather-agent",
    version,
    about = "Chat with an LLM that can look up the weather"
)]
pub struct Cli {}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Loads configuration and runs the interactive chat loop.
pub async fn run(_cli: Cli) -> Result<()> {
    let config = config::Config::load()?;
    chat::run_chat(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["weather-agent"]).is_ok());
        assert!(Cli::try_parse_from(["weather-agent", "--model", "x"]).is_err());
    }
}
