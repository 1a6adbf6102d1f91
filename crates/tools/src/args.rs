//! Argument extraction helpers shared by the tool implementations.
//!
//! The registry validates arguments against each tool's schema before
//! dispatch, but tools still guard their own extraction so they stay
//! safe when exercised directly.

use serde_json::Value;
use wayfarer_core::error::ToolError;

pub(crate) fn require_str<'a>(
    args: &'a Value,
    key: &str,
    tool: &str,
) -> Result<&'a str, ToolError> {
    args[key].as_str().ok_or_else(|| ToolError::InvalidArguments {
        tool_name: tool.to_string(),
        reason: format!("Missing '{key}' argument"),
    })
}

pub(crate) fn opt_str<'a>(args: &'a Value, key: &str, default: &'a str) -> &'a str {
    args[key].as_str().unwrap_or(default)
}

pub(crate) fn opt_u64(args: &Value, key: &str, default: u64) -> u64 {
    args[key].as_u64().unwrap_or(default)
}

pub(crate) fn opt_f64(args: &Value, key: &str, default: f64) -> f64 {
    args[key].as_f64().unwrap_or(default)
}
