//! Event trace — the append-only record of everything the loop does.
//!
//! Every model request, tool call, tool result, final response, and error
//! becomes one [`TraceEntry`]. Entries are handed to an [`EventSink`] as
//! they are produced (for live mirroring to a UI, log shipping, etc.) and
//! collected into the chat outcome for later inspection. The sink is a
//! consumer only — nothing in the loop depends on what it does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// What kind of loop action a trace entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceKind {
    System,
    Request,
    ToolCall,
    ToolResult,
    Response,
    Error,
}

/// One record in the append-only event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Unique entry id
    pub id: String,

    /// What happened
    pub kind: TraceKind,

    /// When it happened
    pub timestamp: DateTime<Utc>,

    /// Short human-readable summary (e.g., "→ search_flights invoked")
    pub label: String,

    /// Structured detail — purely observational, never drives control flow
    pub payload: serde_json::Value,
}

impl TraceEntry {
    pub fn new(kind: TraceKind, label: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: format!("log_{}", Uuid::new_v4()),
            kind,
            timestamp: Utc::now(),
            label: label.into(),
            payload,
        }
    }
}

/// Receives each trace entry as it is produced.
///
/// Called synchronously from the orchestration loop. Implementations must
/// not panic into the loop; failures to deliver are theirs to swallow.
pub trait EventSink: Send + Sync {
    fn on_event(&self, entry: &TraceEntry);
}

/// A sink that drops every entry. Useful default for callers that only
/// want the collected trace in the outcome.
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&self, _entry: &TraceEntry) {}
}

/// A broadcast-based sink for live fan-out to multiple subscribers.
///
/// Uses `tokio::sync::broadcast`; delivery is best-effort — entries
/// published with no subscribers (or to lagging subscribers) are dropped
/// silently, which is exactly what a live debugging mirror wants.
pub struct BroadcastSink {
    sender: broadcast::Sender<Arc<TraceEntry>>,
}

impl BroadcastSink {
    /// Create a new broadcast sink with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to receive entries.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<TraceEntry>> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventSink for BroadcastSink {
    fn on_event(&self, entry: &TraceEntry) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(entry.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcast_sink_delivers_entries() {
        let sink = BroadcastSink::new(16);
        let mut rx = sink.subscribe();

        sink.on_event(&TraceEntry::new(
            TraceKind::ToolCall,
            "→ search_flights invoked",
            serde_json::json!({"toolName": "search_flights"}),
        ));

        let entry = rx.recv().await.unwrap();
        assert_eq!(entry.kind, TraceKind::ToolCall);
        assert!(entry.label.contains("search_flights"));
    }

    #[test]
    fn broadcast_sink_no_subscribers_doesnt_panic() {
        let sink = BroadcastSink::new(16);
        sink.on_event(&TraceEntry::new(
            TraceKind::Error,
            "Error: nobody listening",
            serde_json::json!({}),
        ));
    }

    #[test]
    fn trace_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&TraceKind::ToolResult).unwrap();
        assert_eq!(json, "\"TOOL_RESULT\"");
    }

    #[test]
    fn entries_get_unique_ids() {
        let a = TraceEntry::new(TraceKind::System, "a", serde_json::json!({}));
        let b = TraceEntry::new(TraceKind::System, "b", serde_json::json!({}));
        assert_ne!(a.id, b.id);
    }
}
