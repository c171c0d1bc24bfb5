//! Picks the one string to show the user out of an engine reply.
//!
//! Assistant prose wins over tool output, and assistant content that still
//! carries the raw `[TOOL_CALLS]` encoding is never shown. The scan covers the
//! whole history in reverse, not just the last turn.

use std::fmt;

use tracing::{info, warn};

use crate::constants::{NO_CONTENT_SENTINEL, TOOL_CALLS_MARKER, UNEXPECTED_FORMAT_SENTINEL};
use crate::engine::EngineReply;
use crate::message::{Message, ToolInvocation};

/// The display outcome of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Trimmed content of the chosen message.
    Content(String),
    /// Nothing displayable was found.
    NoContent,
    /// The engine reply had an unknown shape.
    UnexpectedFormat,
    /// The engine call failed; holds the error description.
    Error(String),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content(text) => f.write_str(text),
            Self::NoContent => f.write_str(NO_CONTENT_SENTINEL),
            Self::UnexpectedFormat => f.write_str(UNEXPECTED_FORMAT_SENTINEL),
            Self::Error(description) => write!(f, "Error: {description}"),
        }
    }
}

/// Selects the display string for an engine reply, logging tool usage.
pub fn select(reply: &EngineReply) -> Selection {
    match reply {
        EngineReply::Conversation(state) => {
            log_tool_usage(&state.messages);
            select_from_history(&state.messages)
        }
        EngineReply::Message(msg @ Message::Assistant { content, .. }) => {
            log_tool_usage(std::slice::from_ref(msg));
            displayable(content)
                .map(Selection::Content)
                .unwrap_or(Selection::NoContent)
        }
        other => {
            warn!("Unexpected response type: {}", other);
            Selection::UnexpectedFormat
        }
    }
}

/// Applies the fallback chain to a message history.
pub fn select_from_history(messages: &[Message]) -> Selection {
    let assistant = messages.iter().rev().find_map(|msg| match msg {
        Message::Assistant { content, .. } => displayable(content),
        _ => None,
    });
    if let Some(text) = assistant {
        return Selection::Content(text);
    }

    // Only the last tool message is considered; a blank one means no content.
    let tool = messages.iter().rev().find_map(|msg| match msg {
        Message::Tool { content, .. } => Some(content.trim()),
        _ => None,
    });
    match tool {
        Some(text) if !text.is_empty() => Selection::Content(text.to_string()),
        _ => Selection::NoContent,
    }
}

/// Every tool invocation in the history, in forward order.
pub fn tool_usage(messages: &[Message]) -> impl Iterator<Item = &ToolInvocation> {
    messages.iter().flat_map(Message::tool_calls)
}

fn log_tool_usage(messages: &[Message]) {
    for call in tool_usage(messages) {
        info!("Tool used: {} with input {}", call.name, call.arguments);
    }
}

/// Trimmed assistant content, unless it is blank or a leaked tool-call encoding.
fn displayable(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() || content.contains(TOOL_CALLS_MARKER) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
