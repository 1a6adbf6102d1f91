//! Handshake simulation — composes the full initialize → initialized →
//! tools/list sequence for inspection and demo purposes.
//!
//! This never runs on the chat path and touches no runtime state; it
//! exists so a debugging UI (or the CLI) can show what a real MCP
//! session setup would look like over the registered tool set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use wayfarer_core::provider::ToolDefinition;

use crate::envelope::{
    initialize_request, initialize_response, initialized_notification, tools_list_request,
    tools_list_response,
};

/// One labeled, direction-tagged step in the simulated handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeStep {
    /// "client→server" or "server→client"
    pub direction: String,
    /// Human-readable label (e.g., "Initialize Request")
    pub label: String,
    /// The envelope, serialized to a JSON value
    pub message: Value,
}

fn step(direction: &str, label: &str, message: impl Serialize) -> HandshakeStep {
    HandshakeStep {
        direction: direction.to_string(),
        label: label.to_string(),
        message: serde_json::to_value(message).unwrap_or_default(),
    }
}

/// Compose the full handshake sequence over the given tool definitions.
pub fn simulate_handshake(tools: &[ToolDefinition]) -> Vec<HandshakeStep> {
    let init_req = initialize_request();
    let init_resp = initialize_response(init_req.id.as_deref().unwrap_or_default());
    let initialized = initialized_notification();
    let list_req = tools_list_request();
    let list_resp = tools_list_response(list_req.id.as_deref().unwrap_or_default(), tools);

    vec![
        step("client→server", "Initialize Request", init_req),
        step("server→client", "Initialize Response", init_resp),
        step("client→server", "Initialized Notification", initialized),
        step("client→server", "Tools List Request", list_req),
        step("server→client", "Tools List Response", list_resp),
    ]
}
