//! Metrics registry
//!
//! Counters only: monotonic, exact, reset on process start. Thread-safe via
//! atomics with Relaxed ordering (eventual consistency is fine for
//! metrics).

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one engine
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Filter indexes created (first sighting of a filter name)
    filters_created: AtomicU64,
    /// `set` calls completed
    sets_applied: AtomicU64,
    /// `get` calls that resolved a record
    lookups_served: AtomicU64,
    /// `get_around` calls that resolved a target
    windows_served: AtomicU64,
    /// Dropped filter memberships removed from their indexes
    stale_entries_pruned: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment filter indexes created
    pub fn increment_filters_created(&self) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment sets applied
    pub fn increment_sets_applied(&self) {
        self.sets_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment lookups served
    pub fn increment_lookups_served(&self) {
        self.lookups_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment windows served
    pub fn increment_windows_served(&self) {
        self.windows_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment stale entries pruned
    pub fn increment_stale_entries_pruned(&self) {
        self.stale_entries_pruned.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            sets_applied: self.sets_applied.load(Ordering::Relaxed),
            lookups_served: self.lookups_served.load(Ordering::Relaxed),
            windows_served: self.windows_served.load(Ordering::Relaxed),
            stale_entries_pruned: self.stale_entries_pruned.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub sets_applied: u64,
    pub lookups_served: u64,
    pub windows_served: u64,
    pub stale_entries_pruned: u64,
}
