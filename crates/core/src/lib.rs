//! # Wayfarer Core
//!
//! Domain types, traits, and error definitions for the Wayfarer travel
//! concierge agent. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping the model backend via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod event;
pub mod message;
pub mod provider;
pub mod schema;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, ToolError};
pub use event::{BroadcastSink, EventSink, NullSink, TraceEntry, TraceKind};
pub use message::{Message, Role};
pub use provider::{HealthReport, ModelReply, Provider, ProviderRequest, ToolDefinition};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolUsage};
