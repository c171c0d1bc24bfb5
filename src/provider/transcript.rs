//! Rebuilds a message history from rig-core's multi-turn stream.
//!
//! rig-core runs the tool loop internally and only reports events: text
//! deltas, tool calls, and tool results. [`Transcript`] folds those events
//! back into assistant and tool [`Message`]s in the order they happened.

use std::collections::HashMap;

use serde_json::Value;

use crate::message::{Message, ToolInvocation};

#[derive(Debug, Default)]
pub(super) struct Transcript {
    messages: Vec<Message>,
    text: String,
    calls: Vec<ToolInvocation>,
    /// rig-core internal call id -> provider tool call id.
    call_ids: HashMap<String, String>,
}

impl Transcript {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Appends a text delta to the current assistant turn.
    pub(super) fn push_text(&mut self, delta: &str) {
        self.text.push_str(delta);
    }

    /// Records a tool call on the current assistant turn.
    pub(super) fn push_tool_call(
        &mut self,
        internal_call_id: String,
        id: String,
        name: String,
        arguments: Value,
    ) {
        self.call_ids.insert(internal_call_id, id.clone());
        self.calls.push(ToolInvocation::new(id, name, arguments));
    }

    /// Closes the current assistant turn and records a tool result.
    pub(super) fn push_tool_result(&mut self, internal_call_id: &str, fallback_id: String, content: String) {
        self.flush_assistant();
        let id = self
            .call_ids
            .get(internal_call_id)
            .cloned()
            .unwrap_or(fallback_id);
        self.messages.push(Message::tool_result(id, content));
    }

    /// Closes the last assistant turn and returns every message produced.
    pub(super) fn finish(mut self) -> Vec<Message> {
        self.flush_assistant();
        self.messages
    }

    fn flush_assistant(&mut self) {
        if self.text.is_empty() && self.calls.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        let calls = std::mem::take(&mut self.calls);
        self.messages.push(Message::assistant_with_tools(text, calls));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_answer() {
        let mut t = Transcript::new();
        t.push_text("Hello");
        t.push_text(", world");
        assert_eq!(t.finish(), vec![Message::assistant("Hello, world")]);
    }

    #[test]
    fn test_nothing_streamed() {
        assert!(Transcript::new().finish().is_empty());
    }

    #[test]
    fn test_tool_round_trip() {
        let mut t = Transcript::new();
        t.push_text("Let me check.");
        t.push_tool_call(
            "internal-1".into(),
            "call_abc".into(),
            "get_weather".into(),
            json!({"city": "Paris"}),
        );
        t.push_tool_result(
            "internal-1",
            "ignored".into(),
            "The weather in Paris is sunny and 25°C.".into(),
        );
        t.push_text("It's sunny and 25°C in Paris.");

        let messages = t.finish();
        assert_eq!(
            messages,
            vec![
                Message::assistant_with_tools(
                    "Let me check.",
                    vec![ToolInvocation::new("call_abc", "get_weather", json!({"city": "Paris"}))],
                ),
                Message::tool_result("call_abc", "The weather in Paris is sunny and 25°C."),
                Message::assistant("It's sunny and 25°C in Paris."),
            ]
        );
    }

    #[test]
    fn test_parallel_calls_share_one_turn() {
        let mut t = Transcript::new();
        t.push_tool_call("i1".into(), "c1".into(), "get_weather".into(), json!({"city": "Oslo"}));
        t.push_tool_call("i2".into(), "c2".into(), "get_weather".into(), json!({"city": "Rome"}));
        t.push_tool_result("i1", "x".into(), "oslo".into());
        t.push_tool_result("i2", "x".into(), "rome".into());

        let messages = t.finish();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].tool_calls().len(), 2);
        assert_eq!(messages[1], Message::tool_result("c1", "oslo"));
        assert_eq!(messages[2], Message::tool_result("c2", "rome"));
    }

    #[test]
    fn test_unknown_internal_id_uses_fallback() {
        let mut t = Transcript::new();
        t.push_tool_result("missing", "result-id".into(), "data".into());
        assert_eq!(t.finish(), vec![Message::tool_result("result-id", "data")]);
    }
}
