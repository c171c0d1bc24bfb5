//! Entry point for weather-agent, a terminal chat agent with a weather tool.
//!
//! Loads environment variables, installs logging, parses CLI arguments via
//! [`cli`], and runs the chat loop.

mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod engine;
mod logging;
mod message;
mod provider;
mod selector;
mod tools;

use anyhow::Result;

/// Runs the weather-agent CLI.
///
/// Loads `.env` files (silently ignored if absent) so API keys are visible
/// to config resolution, then hands off to [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    logging::init();
    cli::run(cli).await
}
