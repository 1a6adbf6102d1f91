//! Tool trait and registry — the abstraction over concierge capabilities.
//!
//! Tools are what the model can ask the agent to execute: flight search,
//! hotel search, weather forecasts, etc. The registry is open for
//! extension at startup and closed at runtime: tools are registered once,
//! then the set is fixed while usage counters tick per dispatch.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::provider::ToolDefinition;
use crate::schema;

/// A request to execute a tool, as produced by the model backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Correlation ID (the backend's tool_call id, or a generated one)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// Per-tool usage counter snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUsage {
    pub name: String,
    pub count: u64,
}

/// The core Tool trait.
///
/// Each travel tool (search_flights, search_hotels, get_weather_forecast,
/// ...) implements this trait. Tools are registered in the ToolRegistry
/// and made available to the orchestration loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "search_flights").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments, returning a
    /// JSON-serializable result payload.
    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

struct RegisteredTool {
    tool: Box<dyn Tool>,
    usage: AtomicU64,
}

/// A registry of available tools.
///
/// The orchestration loop uses this to:
/// 1. Get tool definitions to send to the LLM
/// 2. Look up and dispatch tools when the LLM requests them
///
/// Registration order is preserved so the tool manifest presented to the
/// model is deterministic. Usage counters are atomic — the registry may be
/// shared (via `Arc`) across concurrently running loop instances.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Fails if a tool with the same name already exists
    /// or the declared parameter schema is not an object schema.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> std::result::Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.iter().any(|t| t.tool.name() == name) {
            return Err(ToolError::Duplicate(name));
        }
        schema::check_schema(&tool.parameters_schema())
            .map_err(|reason| ToolError::InvalidSchema(name, reason))?;
        self.tools.push(RegisteredTool {
            tool,
            usage: AtomicU64::new(0),
        });
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.tool.name() == name)
            .map(|t| t.tool.as_ref())
    }

    /// Get all tool definitions (for sending to the LLM), in
    /// registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.tool.to_definition()).collect()
    }

    /// Dispatch a tool by name.
    ///
    /// Unknown names fail without counting. Arguments are validated
    /// against the tool's declared schema before dispatch; once validation
    /// passes the usage counter is incremented exactly once, then the
    /// handler runs. Handler failures propagate to the caller but the
    /// dispatch still counts.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let entry = self
            .tools
            .iter()
            .find(|t| t.tool.name() == name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        schema::validate_arguments(&entry.tool.parameters_schema(), &arguments).map_err(
            |reason| ToolError::InvalidArguments {
                tool_name: name.to_string(),
                reason,
            },
        )?;

        entry.usage.fetch_add(1, Ordering::Relaxed);
        entry.tool.execute(arguments).await
    }

    /// List all registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.tool.name()).collect()
    }

    /// Snapshot the per-tool usage counters.
    pub fn usage(&self) -> Vec<ToolUsage> {
        self.tools
            .iter()
            .map(|t| ToolUsage {
                name: t.tool.name().to_string(),
                count: t.usage.load(Ordering::Relaxed),
            })
            .collect()
    }

    /// Zero all usage counters. Used for session resets, not the hot loop.
    pub fn reset_usage(&self) {
        for t in &self.tools {
            t.usage.store(0, Ordering::Relaxed);
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }
        async fn execute(
            &self,
            arguments: serde_json::Value,
        ) -> std::result::Result<serde_json::Value, ToolError> {
            Ok(serde_json::json!({ "echoed": arguments["text"] }))
        }
    }

    /// A tool whose handler always fails.
    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        fn name(&self) -> &str {
            "broken"
        }
        fn description(&self) -> &str {
            "Always fails"
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({ "type": "object", "properties": {} })
        }
        async fn execute(
            &self,
            _arguments: serde_json::Value,
        ) -> std::result::Result<serde_json::Value, ToolError> {
            Err(ToolError::ExecutionFailed {
                tool_name: "broken".into(),
                reason: "wires crossed".into(),
            })
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let err = registry.register(Box::new(EchoTool)).unwrap_err();
        assert!(matches!(err, ToolError::Duplicate(name) if name == "echo"));
    }

    #[test]
    fn registry_definitions_preserve_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        registry.register(Box::new(BrokenTool)).unwrap();
        let defs = registry.definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "echo");
        assert_eq!(defs[1].name, "broken");
    }

    #[tokio::test]
    async fn invoke_executes_and_counts() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();

        let result = registry
            .invoke("echo", serde_json::json!({"text": "hello"}))
            .await
            .unwrap();
        assert_eq!(result["echoed"], "hello");
        assert_eq!(registry.usage()[0].count, 1);
    }

    #[tokio::test]
    async fn invoke_unknown_tool_does_not_count() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke("nonexistent", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn invoke_rejects_invalid_arguments_before_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();

        let err = registry
            .invoke("echo", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
        // Invalid arguments never reach the handler and don't count
        assert_eq!(registry.usage()[0].count, 0);
    }

    #[tokio::test]
    async fn failed_handler_still_counts() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(BrokenTool)).unwrap();

        let err = registry
            .invoke("broken", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
        assert_eq!(registry.usage()[0].count, 1);
    }

    #[tokio::test]
    async fn reset_usage_zeroes_all_counters() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        registry
            .invoke("echo", serde_json::json!({"text": "a"}))
            .await
            .unwrap();
        registry
            .invoke("echo", serde_json::json!({"text": "b"}))
            .await
            .unwrap();
        assert_eq!(registry.usage()[0].count, 2);

        registry.reset_usage();
        assert!(registry.usage().iter().all(|u| u.count == 0));
    }
}
