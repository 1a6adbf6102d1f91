//! Provider trait — the abstraction over the model backend.
//!
//! A Provider knows how to send a conversation plus the available-tools
//! manifest to a language model and classify the reply: either a final
//! natural-language answer or a batch of tool-invocation requests.
//!
//! The reference implementation talks to Ollama's native chat API; any
//! backend exposing the same contract can be swapped in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Message;
use crate::tool::ToolCall;

/// A request to the model backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "qwen3:8b")
    pub model: String,

    /// The conversation messages (owned snapshot — providers never mutate
    /// the caller's history)
    pub messages: Vec<Message>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// The model backend's classified reply.
#[derive(Debug, Clone)]
pub enum ModelReply {
    /// A final natural-language answer — ends the orchestration loop.
    Answer {
        text: String,
        /// Tokens evaluated, when the backend reports it
        eval_count: Option<u64>,
        /// Evaluation wall time in nanoseconds, when reported
        eval_duration: Option<u64>,
    },

    /// The model wants tools executed before it can answer.
    ToolCalls {
        /// Raw assistant content accompanying the directive (may be empty)
        content: String,
        /// Requested calls, in the order the backend produced them
        calls: Vec<ToolCall>,
    },
}

impl ModelReply {
    pub fn is_answer(&self) -> bool {
        matches!(self, ModelReply::Answer { .. })
    }
}

/// Result of an advisory backend health probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Could the backend be reached at all?
    pub healthy: bool,

    /// Is the configured model present on the backend?
    pub model_available: bool,

    /// Human-readable detail: the error on failure, or the available
    /// model list on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The Model Gateway trait.
///
/// The orchestration loop calls `chat()` without knowing which backend is
/// behind it. Implementations surface transport failures as
/// [`ProviderError::Unavailable`] and malformed or non-success replies as
/// [`ProviderError::Protocol`]; they never retry internally — failure
/// policy belongs to the loop.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send the conversation and tool manifest, get a classified reply.
    async fn chat(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ModelReply, ProviderError>;

    /// Advisory health probe. Never gates the chat path.
    async fn health_check(&self) -> std::result::Result<HealthReport, ProviderError>;
}
