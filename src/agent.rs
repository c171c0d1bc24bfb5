//! Query processing around the reasoning engine.
//!
//! [`QueryProcessor::process_query`] wraps one user query in a fresh
//! [`ConversationState`], hands it to the engine exactly once, and turns
//! whatever comes back (including failures) into a display string via
//! [`selector::select`](crate::selector::select).

use tracing::{debug, error, info};

use crate::engine::ReasoningEngine;
use crate::message::ConversationState;
use crate::selector::{self, Selection};

/// Turns user text into a displayable answer. Never fails.
pub struct QueryProcessor {
    engine: Box<dyn ReasoningEngine>,
}

impl QueryProcessor {
    pub fn new(engine: Box<dyn ReasoningEngine>) -> Self {
        Self { engine }
    }

    /// Runs one query and returns the string to show the user.
    ///
    /// Engine failures come back as `"Error: <description>"`. There is no
    /// retry: each call reaches the engine once.
    pub async fn process_query(&self, text: &str, session_id: &str) -> String {
        info!("Processing query: {}", text);
        let state = ConversationState::from_query(text, session_id);

        let selection = match self.engine.run(state).await {
            Ok(reply) => {
                debug!("Raw response: {:?}", reply);
                selector::select(&reply)
            }
            Err(e) => {
                error!("Error processing query: {}", e);
                Selection::Error(e.to_string())
            }
        };

        let response = selection.to_string();
        if !matches!(selection, Selection::Error(_)) {
            info!("Agent response: {}", response);
        }
        response
    }
}
