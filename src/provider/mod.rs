//! LLM provider abstraction for weather-agent.
//!
//! Wraps rig-core's provider clients behind a [`Provider`] struct with enum
//! dispatch, and implements [`ReasoningEngine`](crate::engine::ReasoningEngine)
//! on top of rig-core's multi-turn tool loop. Supports OpenRouter, OpenAI
//! (or any compatible endpoint), and Ollama via [`ProviderKind`].

mod client;
mod kind;
mod transcript;

pub use client::Provider;
pub use kind::ProviderKind;
