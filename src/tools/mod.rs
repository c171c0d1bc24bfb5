pub mod rig_adapter;
pub mod weather;

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

use weather::WeatherTool;

/// The result of executing a tool. Failures are reported through `Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub content: String,
}

impl ToolResult {
    pub fn success(content: String) -> Self {
        Self { content }
    }
}

/// Definition sent to the LLM so it knows what tools are available.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value, // JSON Schema
}

/// Every tool implements this trait.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the LLM uses to call this tool.
    fn name(&self) -> &str;

    /// Natural-language description the LLM uses to decide when to call it.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input parameters.
    fn schema(&self) -> Value;

    /// Execute the tool with the given JSON input.
    async fn execute(&self, input: Value) -> Result<ToolResult>;
}

/// Holds all registered tools and hands them to the engine.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Called during startup.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(Arc::from(tool));
    }

    /// Names of the registered tools, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Produce definitions for the LLM (sent in the API request).
    #[cfg(test)]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.schema(),
            })
            .collect()
    }

    /// Look up a tool by name and execute it.
    #[cfg(test)]
    pub async fn execute(&self, name: &str, input: Value) -> Result<ToolResult> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;
        tool.execute(input).await
    }

    /// How many tools are registered.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Converts all registered tools into rig-core [`ToolDyn`](rig::tool::ToolDyn) trait objects.
    ///
    /// Returns a fresh `Vec` each call so the result can be moved into an
    /// agent builder's `.tools()` without borrow/move conflicts.
    pub fn to_rig_tools(&self) -> Vec<Box<dyn rig::tool::ToolDyn>> {
        self.tools
            .iter()
            .map(|t| {
                Box::new(rig_adapter::RigToolAdapter::new(Arc::clone(t)))
                    as Box<dyn rig::tool::ToolDyn>
            })
            .collect()
    }

    /// Create a registry with the built-in weather tool.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(WeatherTool));
        registry
    }
}
