//! Trace recording — collects the event log while mirroring it live.

use std::sync::Arc;

use wayfarer_core::event::{EventSink, TraceEntry, TraceKind};

/// Appends entries to an owned log and forwards each one to the sink as
/// it is produced.
pub struct TraceRecorder {
    sink: Arc<dyn EventSink>,
    entries: Vec<TraceEntry>,
}

impl TraceRecorder {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, kind: TraceKind, label: impl Into<String>, payload: serde_json::Value) {
        let entry = TraceEntry::new(kind, label, payload);
        self.sink.on_event(&entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}
