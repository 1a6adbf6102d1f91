//! Error types for the Wayfarer domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Wayfarer operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Model backend errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A chat request was cancelled by the caller before completion.
    #[error("Chat request cancelled")]
    Cancelled,

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures talking to the model backend.
///
/// `Unavailable` means the transport never reached the backend;
/// `Protocol` means the backend answered but the reply was malformed
/// or non-success. Neither is retried inside the orchestration loop.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Backend unreachable: {0}")]
    Unavailable(String),

    #[error("Backend protocol error: {message} (status: {status_code})")]
    Protocol { status_code: u16, message: String },
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Duplicate tool name: {0}")]
    Duplicate(String),

    #[error("Tool '{0}' declares an invalid parameter schema: {1}")]
    InvalidSchema(String, String),

    #[error("Unknown tool: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments for {tool_name}: {reason}")]
    InvalidArguments { tool_name: String, reason: String },

    #[error("Tool execution failed in {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::Protocol {
            status_code: 500,
            message: "model runner crashed".into(),
        });
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model runner crashed"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "search_flights".into(),
            reason: "bad departure date".into(),
        });
        assert!(err.to_string().contains("search_flights"));
        assert!(err.to_string().contains("bad departure date"));
    }

    #[test]
    fn unknown_tool_names_the_tool() {
        let err = ToolError::NotFound("teleport".into());
        assert!(err.to_string().contains("teleport"));
    }
}
