//! The reasoning-engine boundary.
//!
//! The tool-calling control loop is not implemented here: it lives behind
//! [`ReasoningEngine`], which takes a [`ConversationState`] and hands back
//! whatever the engine produced. The production implementation is
//! [`Provider`](crate::provider::Provider); tests substitute a mock.

use std::fmt;

use crate::message::{ConversationState, Message};

/// What the engine handed back after finishing all internal turns.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineReply {
    /// The input state with the engine's messages appended.
    Conversation(ConversationState),
    /// A single message instead of a full state.
    Message(Message),
    /// A payload the selector does not recognize, described for logging.
    Unrecognized(String),
}

impl fmt::Display for EngineReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conversation(state) => write!(
                f,
                "conversation [session: {}] with {} message(s)",
                state.session_id,
                state.messages.len()
            ),
            Self::Message(msg) => write!(f, "single {} message", msg.role()),
            Self::Unrecognized(kind) => write!(f, "{kind}"),
        }
    }
}

/// Failures raised while talking to the engine.
///
/// The `Display` output is what the user sees after `Error: `.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The request or its stream failed (network, auth, rate limit, bad payload).
    #[error("{0}")]
    Stream(String),
    /// The state handed to the engine cannot be turned into a request.
    #[error("invalid conversation state: {0}")]
    InvalidState(String),
}

/// Runs the model/tool control loop for one conversation.
///
/// Futures are not required to be `Send`: queries run one at a time on a
/// current-thread runtime.
#[async_trait::async_trait(?Send)]
pub trait ReasoningEngine {
    /// Consumes `state` and returns the engine's final reply.
    async fn run(&self, state: ConversationState) -> Result<EngineReply, EngineError>;
}
