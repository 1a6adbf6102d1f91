//! The Wayfarer orchestration loop.
//!
//! Ties the model gateway, tool registry, envelope builder, and event
//! sink together into the chat-processing state machine, and owns the
//! session-level statistics.

pub mod loop_runner;
pub mod stats;
pub mod trace;

pub use loop_runner::{ChatLoop, ChatOutcome, DEFAULT_MAX_ITERATIONS, Termination};
pub use stats::{SessionStats, StatsSnapshot};
pub use trace::TraceRecorder;
