//! Session-level statistics aggregation.
//!
//! One [`SessionStats`] instance is owned by the caller and handed to the
//! chat loop (shared via `Arc`). There is no process-wide singleton; a
//! fresh instance is a fresh session.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug)]
struct Inner {
    started_at: DateTime<Utc>,
    total_api_calls: u64,
    total_tool_invocations: u64,
    total_tool_duration_ms: u64,
    estimated_tokens: u64,
    response_times_ms: Vec<u64>,
}

impl Inner {
    fn fresh() -> Self {
        Self {
            started_at: Utc::now(),
            total_api_calls: 0,
            total_tool_invocations: 0,
            total_tool_duration_ms: 0,
            estimated_tokens: 0,
            response_times_ms: Vec::new(),
        }
    }
}

/// Aggregate counters for one concierge session.
pub struct SessionStats {
    inner: RwLock<Inner>,
}

/// Point-in-time view of the session counters.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub session_started: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub total_api_calls: u64,
    pub total_tool_invocations: u64,
    pub total_tool_duration_ms: u64,
    pub estimated_tokens: u64,
    pub avg_response_time_ms: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::fresh()),
        }
    }

    /// Record one completed model round-trip.
    pub fn record_api_call(&self, elapsed_ms: u64) {
        if let Ok(mut inner) = self.inner.write() {
            inner.total_api_calls += 1;
            inner.response_times_ms.push(elapsed_ms);
        }
    }

    /// Record one tool dispatch and its wall time.
    pub fn record_tool_invocation(&self, duration_ms: u64) {
        if let Ok(mut inner) = self.inner.write() {
            inner.total_tool_invocations += 1;
            inner.total_tool_duration_ms += duration_ms;
        }
    }

    /// Add a rough token estimate for generated content (length / 4,
    /// matching the rule of thumb the stats UI expects).
    pub fn add_estimated_tokens(&self, content_len: usize) {
        if let Ok(mut inner) = self.inner.write() {
            inner.estimated_tokens += (content_len / 4) as u64;
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        let avg = if inner.response_times_ms.is_empty() {
            0
        } else {
            inner.response_times_ms.iter().sum::<u64>() / inner.response_times_ms.len() as u64
        };
        StatsSnapshot {
            session_started: inner.started_at,
            uptime_seconds: (Utc::now() - inner.started_at).num_seconds(),
            total_api_calls: inner.total_api_calls,
            total_tool_invocations: inner.total_tool_invocations,
            total_tool_duration_ms: inner.total_tool_duration_ms,
            estimated_tokens: inner.estimated_tokens,
            avg_response_time_ms: avg,
        }
    }

    /// Zero every counter and restart the session clock.
    pub fn reset(&self) {
        if let Ok(mut inner) = self.inner.write() {
            *inner = Inner::fresh();
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let stats = SessionStats::new();
        stats.record_api_call(100);
        stats.record_api_call(300);
        stats.record_tool_invocation(450);
        stats.add_estimated_tokens(100);

        let snap = stats.snapshot();
        assert_eq!(snap.total_api_calls, 2);
        assert_eq!(snap.total_tool_invocations, 1);
        assert_eq!(snap.total_tool_duration_ms, 450);
        assert_eq!(snap.estimated_tokens, 25);
        assert_eq!(snap.avg_response_time_ms, 200);
    }

    #[test]
    fn empty_session_has_zero_average() {
        let snap = SessionStats::new().snapshot();
        assert_eq!(snap.avg_response_time_ms, 0);
        assert_eq!(snap.total_api_calls, 0);
    }

    #[test]
    fn reset_restarts_the_session() {
        let stats = SessionStats::new();
        stats.record_api_call(100);
        stats.record_tool_invocation(50);
        stats.reset();

        let snap = stats.snapshot();
        assert_eq!(snap.total_api_calls, 0);
        assert_eq!(snap.total_tool_invocations, 0);
        assert_eq!(snap.estimated_tokens, 0);
    }
}
