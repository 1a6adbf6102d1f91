//! JSON-RPC 2.0 envelope types and pure constructor functions.
//!
//! Every request constructor mints a fresh UUID correlation id; every
//! response constructor echoes the originating id. Construction never
//! touches shared state, so these are safe to call from anywhere.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use wayfarer_core::provider::ToolDefinition;

use crate::{CLIENT_NAME, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

/// A JSON-RPC 2.0 request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Correlation id. Absent for notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The method to invoke.
    pub method: String,
    /// Method parameters.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Echoed from the request.
    pub id: String,
    /// Present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code (negative numbers are reserved by JSON-RPC).
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Initialize request (client → server).
pub fn initialize_request() -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(fresh_id()),
        method: "initialize".into(),
        params: json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "roots": { "listChanged": true },
                "sampling": {}
            },
            "clientInfo": {
                "name": CLIENT_NAME,
                "version": SERVER_VERSION,
            }
        }),
    }
}

/// Initialize response (server → client), echoing the request id.
pub fn initialize_response(request_id: &str) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id: request_id.to_string(),
        result: Some(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": server_capabilities(),
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
            }
        })),
        error: None,
    }
}

/// Initialized notification (client → server). Notifications carry no id.
pub fn initialized_notification() -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: None,
        method: "notifications/initialized".into(),
        params: Value::Null,
    }
}

/// Tools list request.
pub fn tools_list_request() -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(fresh_id()),
        method: "tools/list".into(),
        params: Value::Null,
    }
}

/// Tools list response over the given definitions.
pub fn tools_list_response(request_id: &str, tools: &[ToolDefinition]) -> JsonRpcResponse {
    let tools: Vec<Value> = tools
        .iter()
        .map(|t| {
            json!({
                "name": t.name,
                "description": t.description,
                "inputSchema": t.parameters,
            })
        })
        .collect();

    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id: request_id.to_string(),
        result: Some(json!({ "tools": tools })),
        error: None,
    }
}

/// Tool call request for one dispatch.
pub fn tool_call_request(tool_name: &str, arguments: &Value) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(fresh_id()),
        method: "tools/call".into(),
        params: json!({
            "name": tool_name,
            "arguments": arguments,
        }),
    }
}

/// Successful tool call response. The result payload is embedded verbatim
/// (pretty-printed) as the textual content.
pub fn tool_call_response(request_id: &str, result: &Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id: request_id.to_string(),
        result: Some(json!({
            "content": [{
                "type": "text",
                "text": serde_json::to_string_pretty(result).unwrap_or_default(),
            }],
            "isError": false,
        })),
        error: None,
    }
}

/// Failed tool call response. The failure message is wrapped as textual
/// content with the `isError` flag set — this is the canonical shape the
/// loop uses so the model always receives a well-formed tool result.
pub fn tool_call_error(request_id: &str, message: &str) -> JsonRpcResponse {
    let body = json!({ "error": message });
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id: request_id.to_string(),
        result: Some(json!({
            "content": [{
                "type": "text",
                "text": serde_json::to_string_pretty(&body).unwrap_or_default(),
            }],
            "isError": true,
        })),
        error: None,
    }
}

/// Generic protocol-level error response.
pub fn error_response(request_id: &str, code: i32, message: &str) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id: request_id.to_string(),
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
        }),
    }
}

fn server_capabilities() -> Value {
    json!({
        "tools": { "listChanged": true },
        "resources": { "subscribe": false, "listChanged": false },
        "prompts": { "listChanged": false },
        "logging": {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_carry_fresh_ids() {
        let a = tools_list_request();
        let b = tools_list_request();
        assert_ne!(a.id, b.id);
        assert_eq!(a.jsonrpc, "2.0");
        assert_eq!(a.method, "tools/list");
    }

    #[test]
    fn responses_echo_request_id() {
        let req = initialize_request();
        let id = req.id.as_deref().unwrap();
        let resp = initialize_response(id);
        assert_eq!(resp.id, id);
        assert!(resp.error.is_none());
    }

    #[test]
    fn notification_has_no_id() {
        let note = initialized_notification();
        assert!(note.id.is_none());
        assert_eq!(note.method, "notifications/initialized");
    }

    #[test]
    fn tool_call_request_wraps_arguments() {
        let args = json!({"origin": "NYC", "destination": "DXB"});
        let req = tool_call_request("search_flights", &args);
        assert_eq!(req.method, "tools/call");
        assert_eq!(req.params["name"], "search_flights");
        assert_eq!(req.params["arguments"]["origin"], "NYC");
    }

    #[test]
    fn success_response_embeds_result_verbatim() {
        let result = json!({"success": true, "flights": [{"price": 450}]});
        let resp = tool_call_response("req-1", &result);
        let body = resp.result.unwrap();
        assert_eq!(body["isError"], false);

        // Round-trip: the textual payload parses back to the exact result
        let text = body["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn error_variant_sets_is_error_flag() {
        let resp = tool_call_error("req-2", "no flights on that date");
        let body = resp.result.unwrap();
        assert_eq!(body["isError"], true);
        let text = body["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("no flights on that date"));
    }

    #[test]
    fn generic_error_response_shape() {
        let resp = error_response("req-3", -32601, "method not found");
        assert!(resp.result.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "method not found");
    }

    #[test]
    fn tools_list_response_reports_schemas() {
        let tools = vec![ToolDefinition {
            name: "search_hotels".into(),
            description: "Search for hotels".into(),
            parameters: json!({"type": "object", "properties": {}}),
        }];
        let resp = tools_list_response("req-4", &tools);
        let listed = &resp.result.unwrap()["tools"];
        assert_eq!(listed[0]["name"], "search_hotels");
        assert!(listed[0]["inputSchema"].is_object());
    }
}
