//! MCP-style JSON-RPC 2.0 envelopes for tool-call exchanges.
//!
//! The orchestration loop wraps every tool exchange in a self-describing
//! request/response envelope, independent of the model backend's native
//! wire format. The envelopes are purely observational — they ride along
//! in trace entries and never drive control flow.
//!
//! The targeted protocol version is `2024-11-05`.

pub mod envelope;
pub mod handshake;

pub use envelope::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, error_response, initialize_request,
    initialize_response, initialized_notification, tool_call_error, tool_call_request,
    tool_call_response, tools_list_request, tools_list_response,
};
pub use handshake::{HandshakeStep, simulate_handshake};

/// The MCP protocol version these envelopes describe.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// The server name reported during initialization.
pub const SERVER_NAME: &str = "wayfarer-travel-server";

/// The server version reported during initialization.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The client name reported in the initialize request.
pub const CLIENT_NAME: &str = "wayfarer-client";
