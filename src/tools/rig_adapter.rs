//! Adapter bridging the crate's [`Tool`] trait to rig-core's [`ToolDyn`] trait.
//!
//! rig-core's agent owns the tool-calling loop; [`RigToolAdapter`] is how a
//! registered tool is handed to it, so its definition goes out with each LLM
//! request and its `call` runs when the model asks for it.

use std::pin::Pin;
use std::sync::Arc;

use rig::completion::ToolDefinition as RigToolDefinition;
use rig::tool::{ToolDyn, ToolError};
use tracing::debug;

use super::Tool;

/// Wraps an `Arc<dyn Tool>` and translates between the two tool interfaces.
pub struct RigToolAdapter {
    tool: Arc<dyn Tool>,
}

impl RigToolAdapter {
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        Self { tool }
    }

    /// Parses the raw argument string and runs the wrapped tool.
    ///
    /// Failures, including unparsable arguments, come back as an
    /// `Error: ...` string rather than a [`ToolError`] so the model can see
    /// them and answer anyway.
    pub(crate) async fn call_raw(&self, args: &str) -> Result<String, ToolError> {
        let input: serde_json::Value = match serde_json::from_str(args) {
            Ok(input) => input,
            Err(e) => {
                debug!(tool = self.tool.name(), "unparsable tool arguments: {}", e);
                return Ok(format!("Error: invalid arguments: {}", e));
            }
        };
        debug!(tool = self.tool.name(), %input, "executing tool");
        match self.tool.execute(input).await {
            Ok(result) => Ok(result.content),
            Err(e) => Ok(format!("Error: {}", e)),
        }
    }
}

impl ToolDyn for RigToolAdapter {
    fn name(&self) -> String {
        self.tool.name().to_string()
    }

    fn definition<'a>(
        &'a self,
        _prompt: String,
    ) -> Pin<Box<dyn std::future::Future<Output = RigToolDefinition> + Send + 'a>> {
        let name = self.tool.name().to_string();
        let description = self.tool.description().to_string();
        let parameters = self.tool.schema();
        Box::pin(async move {
            RigToolDefinition {
                name,
                description,
                parameters,
            }
        })
    }

    fn call<'a>(
        &'a self,
        args: String,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<String, ToolError>> + Send + 'a>> {
        Box::pin(async move { self.call_raw(&args).await })
    }
}
