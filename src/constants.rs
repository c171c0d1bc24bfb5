//! Centralized constants for weather-agent.
//!
//! Default strings, sentinels, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in directory paths.
pub const APP_NAME: &str = "weather-agent";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "weather-agent.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

// --- Provider defaults ---

/// Default provider when none is configured.
pub const DEFAULT_PROVIDER: &str = "openrouter";

/// Default LLM model identifier (served through OpenRouter).
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

/// Default LLM model identifier for OpenAI.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";

/// Default LLM model identifier for Ollama.
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3";

/// Default base URL for the OpenRouter API.
pub const OPENROUTER_DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default base URL for local Ollama server.
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 1024;

/// Default number of tool-calling round trips the engine may perform per query.
pub const DEFAULT_MAX_TURNS: usize = 10;

// --- Chat loop ---

/// Session identifier used for every query in the interactive loop.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Input that ends the interactive loop (compared case-insensitively).
pub const EXIT_COMMAND: &str = "exit";

/// Prompt shown before each line of input.
pub const INPUT_PROMPT: &str = "Enter your query: ";

/// Banner printed when the loop starts.
pub const WELCOME_BANNER: &str = "Welcome to the Weather Agent! Type 'exit' to quit.";

// --- Response selection ---

/// Formatting token some backends leak into assistant content in place of a
/// structured tool call. Messages containing it are never displayed.
pub const TOOL_CALLS_MARKER: &str = "[TOOL_CALLS]";

/// Returned when the history holds nothing displayable.
pub const NO_CONTENT_SENTINEL: &str = "No response content found";

/// Returned when the engine hands back a shape the selector does not know.
pub const UNEXPECTED_FORMAT_SENTINEL: &str = "Unexpected response format";
