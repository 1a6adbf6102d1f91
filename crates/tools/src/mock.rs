//! Shared machinery for the mock travel tools.
//!
//! Every tool derives a seed from its input arguments and draws all
//! "random" values from a small PRNG, so identical requests always
//! produce identical results. A simulated network delay (400-1000ms)
//! keeps the end-to-end timing realistic without real upstreams.

use std::time::Duration;

/// Derive a deterministic seed from the request parameters.
pub fn seed(parts: &[&str]) -> u64 {
    parts.iter().flat_map(|p| p.bytes()).fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
        (acc ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Tiny seeded generator (64-bit LCG) for plausible mock values.
pub struct Picker {
    state: u64,
}

impl Picker {
    pub fn new(seed: u64) -> Self {
        Self { state: seed | 1 }
    }

    pub fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 16
    }

    /// Value in `[lo, hi)`.
    pub fn range(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo < hi);
        lo + self.next() % (hi - lo)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next() as usize) % items.len()]
    }

    /// True roughly `percent` out of 100 draws.
    pub fn chance(&mut self, percent: u64) -> bool {
        self.range(0, 100) < percent
    }

    /// Uppercase hex identifier like `FL-3FA8C21B`.
    pub fn short_id(&mut self, prefix: &str) -> String {
        format!("{prefix}-{:08X}", self.next() as u32)
    }
}

/// Simulated upstream latency, seeded so tests under a paused clock
/// can still reason about it.
pub async fn simulate_latency(picker: &mut Picker) {
    let millis = picker.range(400, 1000);
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Render `HH:MM` with minutes snapped to the quarter hour.
pub fn clock_time(picker: &mut Picker) -> String {
    let hours = picker.range(0, 24);
    let minutes = ["00", "15", "30", "45"];
    format!("{hours:02}:{}", picker.pick(&minutes))
}
