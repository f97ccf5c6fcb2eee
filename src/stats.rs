//! Dispatcher & stats (C8): atomic, lock-free counters updated on every
//! search, readable at any time without synchronizing with the hot path.

use std::sync::atomic::{AtomicU64, Ordering};

const ORDER: Ordering = Ordering::Relaxed;

/// Process-observable counters. Never affects match results.
#[derive(Debug, Default)]
pub struct Stats {
    searches: AtomicU64,
    matches: AtomicU64,
    bytes: AtomicU64,
    simd_ops: AtomicU64,
    scalar_ops: AtomicU64,
    /// Running sum of elapsed nanoseconds, divided by `searches` for the
    /// reported average.
    total_nanos: AtomicU64,
}

/// A point-in-time copy of [`Stats`], safe to hand to callers across the C
/// ABI or print from the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub searches: u64,
    pub matches: u64,
    pub bytes: u64,
    pub simd_ops: u64,
    pub scalar_ops: u64,
    pub avg_search_nanos: u64,
}

impl Stats {
    pub fn record(&self, matches: u64, bytes: u64, used_simd: bool, elapsed_nanos: u64) {
        self.searches.fetch_add(1, ORDER);
        self.matches.fetch_add(matches, ORDER);
        self.bytes.fetch_add(bytes, ORDER);
        if used_simd {
            self.simd_ops.fetch_add(1, ORDER);
        } else {
            self.scalar_ops.fetch_add(1, ORDER);
        }
        self.total_nanos.fetch_add(elapsed_nanos, ORDER);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let searches = self.searches.load(ORDER);
        let total_nanos = self.total_nanos.load(ORDER);
        StatsSnapshot {
            searches,
            matches: self.matches.load(ORDER),
            bytes: self.bytes.load(ORDER),
            simd_ops: self.simd_ops.load(ORDER),
            scalar_ops: self.scalar_ops.load(ORDER),
            avg_search_nanos: if searches == 0 { 0 } else { total_nanos / searches },
        }
    }

    pub fn reset(&self) {
        self.searches.store(0, ORDER);
        self.matches.store(0, ORDER);
        self.bytes.store(0, ORDER);
        self.simd_ops.store(0, ORDER);
        self.scalar_ops.store(0, ORDER);
        self.total_nanos.store(0, ORDER);
    }
}
