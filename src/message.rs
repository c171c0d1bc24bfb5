//! Message types for weather-agent's conversation history.
//!
//! A [`Message`] is a tagged variant over the three roles that can appear in
//! a history the reasoning engine hands back. These are the crate's own types,
//! converted to rig-core's `Message` when replayed to the LLM.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool invocation requested by the LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Identifier correlating this call with its tool result.
    #[serde(default)]
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON arguments to pass to the tool.
    pub arguments: Value,
}

impl ToolInvocation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// A single entry in a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolInvocation>,
    },
    Tool {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_call_id: Option<String>,
    },
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            content: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// An assistant turn that requests one or more tool invocations.
    pub fn assistant_with_tools(text: impl Into<String>, tool_calls: Vec<ToolInvocation>) -> Self {
        Self::Assistant {
            content: text.into(),
            tool_calls,
        }
    }

    /// A tool result answering the invocation with the given id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::User { content } | Self::Assistant { content, .. } | Self::Tool { content, .. } => {
                content
            }
        }
    }

    /// Tool invocations carried by this message; empty for non-assistant roles.
    pub fn tool_calls(&self) -> &[ToolInvocation] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Assistant { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }
}

/// The request/response envelope exchanged with the reasoning engine.
///
/// Built fresh for every query; `session_id` is carried for correlation in
/// logs and has no effect on behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub session_id: String,
}

impl ConversationState {
    /// Creates a state holding a single user message.
    pub fn from_query(text: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(text)],
            session_id: session_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_query_builds_single_user_message() {
        let state = ConversationState::from_query("hello", "default");
        assert_eq!(state.session_id, "default");
        assert_eq!(state.messages, vec![Message::user("hello")]);
    }

    #[test]
    fn test_tool_calls_only_on_assistant() {
        let call = ToolInvocation::new("call_1", "get_weather", json!({"city": "Oslo"}));
        let msg = Message::assistant_with_tools("", vec![call.clone()]);
        assert_eq!(msg.tool_calls(), &[call]);
        assert!(Message::user("hi").tool_calls().is_empty());
        assert!(Message::tool_result("call_1", "ok").tool_calls().is_empty());
    }

    #[test]
    fn test_serde_tags_by_role() {
        let msg = Message::tool_result("call_1", "sunny");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"role": "tool", "content": "sunny", "tool_call_id": "call_1"})
        );

        let parsed: Message =
            serde_json::from_value(json!({"role": "assistant", "content": "hi"})).unwrap();
        assert_eq!(parsed, Message::assistant("hi"));
        assert_eq!(parsed.role(), "assistant");
    }
}
