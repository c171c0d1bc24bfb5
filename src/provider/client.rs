//! LLM provider client and the rig-core backed reasoning engine.
//!
//! [`Provider`] wraps a rig-core client behind enum dispatch and runs each
//! conversation through rig-core's multi-turn streaming agent, which owns the
//! whole tool-calling loop. The stream is only observed, to rebuild the
//! message history the engine produced.

use anyhow::{Context, Result};
use futures::StreamExt;
use rig::agent::MultiTurnStreamItem;
use rig::client::CompletionClient;
use rig::message::{
    AssistantContent, Message as RigMessage, Text, ToolCall as RigToolCall, ToolFunction,
    ToolResultContent,
};
use rig::providers::{openai, openrouter};
use rig::streaming::{StreamedAssistantContent, StreamedUserContent, StreamingChat};
use rig::OneOrMany;
use tracing::{debug, info, warn};

use super::kind::ProviderKind;
use super::transcript::Transcript;
use crate::config::Config;
use crate::engine::{EngineError, EngineReply, ReasoningEngine};
use crate::message::{ConversationState, Message};
use crate::tools::ToolRegistry;

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    OpenRouter(openrouter::Client),
    OpenAI(openai::Client),
    Ollama(openai::Client),
}

/// A configured LLM endpoint plus the tools the model may call.
///
/// Agents are constructed on each query since they are cheap to create.
pub struct Provider {
    client: ClientKind,
    kind: ProviderKind,
    model: String,
    preamble: Option<String>,
    max_turns: usize,
    tools: ToolRegistry,
}

/// Builds an agent with tools registered for LLM function calling,
/// then executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent_tools {
    ($client:expr, $model:expr, $sys:expr, $rig_tools:expr, |$agent:ident| $body:expr) => {{
        let $agent = if let Some(sys) = $sys {
            $client
                .agent($model)
                .preamble(sys)
                .max_tokens(crate::constants::MAX_TOKENS)
                .tools($rig_tools)
                .build()
        } else {
            $client
                .agent($model)
                .max_tokens(crate::constants::MAX_TOKENS)
                .tools($rig_tools)
                .build()
        };
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
///
/// Matches on [`ClientKind`] and executes the same block for each variant,
/// letting the compiler monomorphize per provider.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::OpenRouter($client) => $body,
            ClientKind::OpenAI($client) => $body,
            ClientKind::Ollama($client) => $body,
        }
    };
}

/// Drains a multi-turn stream into a [`Transcript`].
///
/// - `StreamAssistantItem(Text)` → text of the current assistant turn
/// - `StreamAssistantItem(ToolCall)` → tool invocation on the current turn
/// - `StreamUserItem(ToolResult)` → closes the turn, appends a tool message
/// - `FinalResponse` → stream complete
/// - an error item aborts with [`EngineError::Stream`]
macro_rules! collect_stream {
    ($stream:expr, $transcript:expr) => {
        while let Some(chunk) = $stream.next().await {
            match chunk {
                Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                    Text { text },
                ))) => {
                    $transcript.push_text(&text);
                }
                Ok(MultiTurnStreamItem::StreamAssistantItem(
                    StreamedAssistantContent::ToolCall {
                        tool_call,
                        internal_call_id,
                    },
                )) => {
                    debug!(tool = %tool_call.function.name, "model requested tool");
                    $transcript.push_tool_call(
                        internal_call_id,
                        tool_call.id,
                        tool_call.function.name,
                        tool_call.function.arguments,
                    );
                }
                Ok(MultiTurnStreamItem::StreamUserItem(StreamedUserContent::ToolResult {
                    tool_result,
                    internal_call_id,
                })) => {
                    let result_text: String = tool_result
                        .content
                        .into_iter()
                        .filter_map(|c| match c {
                            ToolResultContent::Text(t) => Some(t.text),
                            _ => None,
                        })
                        .collect::<Vec<_>>()
                        .join("\n");
                    $transcript.push_tool_result(&internal_call_id, tool_result.id, result_text);
                }
                Ok(MultiTurnStreamItem::FinalResponse(_)) => {
                    debug!("stream complete");
                }
                Err(err) => {
                    return Err(EngineError::Stream(err.to_string()));
                }
                _ => {
                    // Deltas and reasoning chunks are folded by rig-core.
                }
            }
        }
    };
}

impl Provider {
    /// Creates a new [`Provider`] from the loaded config and a tool registry.
    ///
    /// A missing API key is not an error here: the client is built with an
    /// empty key and the endpoint rejects the first request.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown provider name or if client
    /// construction fails.
    pub fn from_config(config: &Config, tools: ToolRegistry) -> Result<Self> {
        let kind = ProviderKind::from_str(&config.default_provider)?;
        let model = kind.model_from(config);
        let api_key = config.resolve_api_key(kind.name()).unwrap_or_default();
        if api_key.is_empty() {
            debug!(provider = kind.name(), "no API key configured");
        }

        let client = match kind {
            ProviderKind::OpenRouter => {
                let base_url = config
                    .base_url(kind.name())
                    .unwrap_or(crate::constants::OPENROUTER_DEFAULT_BASE_URL);
                let client = openrouter::Client::builder()
                    .api_key(api_key.as_str())
                    .base_url(base_url)
                    .build()
                    .context("Failed to create OpenRouter client")?;
                ClientKind::OpenRouter(client)
            }
            ProviderKind::OpenAI => {
                let client = match config.base_url(kind.name()) {
                    Some(base_url) => openai::Client::builder()
                        .api_key(api_key.as_str())
                        .base_url(base_url)
                        .build(),
                    None => openai::Client::builder().api_key(api_key.as_str()).build(),
                }
                .context("Failed to create OpenAI client")?;
                ClientKind::OpenAI(client)
            }
            ProviderKind::Ollama => {
                let base_url = config
                    .base_url(kind.name())
                    .unwrap_or(crate::constants::OLLAMA_DEFAULT_BASE_URL);
                let base_url = format!("{}/v1", base_url.trim_end_matches('/'));
                let client = openai::Client::builder()
                    .api_key("ollama")
                    .base_url(base_url.as_str())
                    .build()
                    .context("Failed to create Ollama client")?;
                ClientKind::Ollama(client)
            }
        };

        info!(
            provider = kind.name(),
            model = %model,
            tools = ?tools.names(),
            "engine ready"
        );

        Ok(Self {
            client,
            kind,
            model,
            preamble: config.system_prompt.clone(),
            max_turns: config.max_turns,
            tools,
        })
    }

    /// The model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Streams one prompt through rig-core's tool loop and returns the
    /// assistant and tool messages it produced.
    async fn stream_turns(
        &self,
        prompt: String,
        history: Vec<RigMessage>,
    ) -> Result<Vec<Message>, EngineError> {
        let mut transcript = Transcript::new();

        dispatch!(self, |client| {
            // Build rig_tools inside dispatch! so each match arm gets a fresh Vec
            let rig_tools = self.tools.to_rig_tools();
            let mut stream = with_agent_tools!(
                client,
                &self.model,
                self.preamble.as_deref(),
                rig_tools,
                |agent| {
                    agent
                        .stream_chat(prompt.clone(), history.clone())
                        .multi_turn(self.max_turns)
                        .await
                }
            );
            collect_stream!(stream, transcript);
        });

        Ok(transcript.finish())
    }
}

#[async_trait::async_trait(?Send)]
impl ReasoningEngine for Provider {
    async fn run(&self, state: ConversationState) -> Result<EngineReply, EngineError> {
        let (prompt, history) = split_prompt(&state.messages)?;
        debug!(
            session = %state.session_id,
            history = history.len(),
            "sending prompt to {}",
            self.kind.name()
        );
        let produced = self.stream_turns(prompt, history).await?;

        let mut state = state;
        state.messages.extend(produced);
        Ok(EngineReply::Conversation(state))
    }
}

/// Splits a history into the prompt (the trailing user message) and the
/// prior messages converted for rig-core.
fn split_prompt(messages: &[Message]) -> Result<(String, Vec<RigMessage>), EngineError> {
    match messages.split_last() {
        Some((Message::User { content }, earlier)) => Ok((
            content.clone(),
            earlier.iter().map(convert_message_to_rig).collect(),
        )),
        Some((last, _)) => Err(EngineError::InvalidState(format!(
            "conversation must end with a user message, found {}",
            last.role()
        ))),
        None => Err(EngineError::InvalidState(
            "conversation has no messages".to_string(),
        )),
    }
}

/// Converts a [`Message`] to a rig-core [`RigMessage`].
///
/// - **User** → `RigMessage::User` with text content
/// - **Assistant** (text only) → `RigMessage::Assistant` with text content
/// - **Assistant** (with tool calls) → `RigMessage::Assistant` with `ToolCall` content items
/// - **Tool** (result) → `RigMessage::User` with `ToolResult` content
fn convert_message_to_rig(msg: &Message) -> RigMessage {
    match msg {
        Message::User { content } => RigMessage::user(content.as_str()),
        Message::Assistant {
            content,
            tool_calls,
        } if tool_calls.is_empty() => RigMessage::assistant(content.as_str()),
        Message::Assistant {
            content,
            tool_calls,
        } => {
            let mut items: Vec<AssistantContent> = Vec::new();
            if !content.is_empty() {
                items.push(AssistantContent::Text(Text {
                    text: content.clone(),
                }));
            }
            for tc in tool_calls {
                items.push(AssistantContent::ToolCall(RigToolCall::new(
                    tc.id.clone(),
                    ToolFunction::new(tc.name.clone(), tc.arguments.clone()),
                )));
            }
            RigMessage::Assistant {
                id: None,
                content: OneOrMany::many(items)
                    .unwrap_or_else(|_| OneOrMany::one(AssistantContent::text(""))),
            }
        }
        Message::Tool {
            content,
            tool_call_id,
        } => {
            let tool_call_id = tool_call_id.clone().unwrap_or_else(|| {
                warn!("tool message missing tool_call_id, using empty string");
                String::new()
            });
            RigMessage::tool_result(tool_call_id, content.as_str())
        }
    }
}
