//! Operation counters for component registries
//!
//! Every registry records its structural operations into one process-wide
//! [`RegistryMetrics`] instance, reachable through [`global`].
//!
//! ## Usage
//!
//! ```ignore
//! use component_core::metrics;
//!
//! let before = metrics::global().snapshot();
//! node.add_component(Transform::default());
//! let after = metrics::global().snapshot();
//! assert!(after.attached > before.attached);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL: RegistryMetrics = RegistryMetrics::new();

/// Counters shared by all registries in the process.
pub fn global() -> &'static RegistryMetrics {
    &GLOBAL
}

/// Thread-safe counters for registry operations
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    /// Children placed into a registry (add, adopt, acquire-miss)
    pub attached: AtomicU64,
    /// Children that left a registry (remove, separate, replace, teardown)
    pub detached: AtomicU64,
    /// Attaches that displaced an existing child of the same type
    pub replaced: AtomicU64,
    /// Children handed back to the caller instead of being released
    pub separated: AtomicU64,
    /// Successful adoptions of externally owned components
    pub adopted: AtomicU64,
    /// Adoptions refused to preserve single ownership
    pub adoptions_rejected: AtomicU64,
    /// Typed lookups performed
    pub lookups: AtomicU64,
    /// Typed lookups that found a child
    pub lookup_hits: AtomicU64,
}

impl RegistryMetrics {
    /// Create a zeroed metrics collector
    pub const fn new() -> Self {
        Self {
            attached: AtomicU64::new(0),
            detached: AtomicU64::new(0),
            replaced: AtomicU64::new(0),
            separated: AtomicU64::new(0),
            adopted: AtomicU64::new(0),
            adoptions_rejected: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
            lookup_hits: AtomicU64::new(0),
        }
    }

    pub fn record_attach(&self, replaced: bool) {
        self.attached.fetch_add(1, Ordering::Relaxed);
        if replaced {
            self.replaced.fetch_add(1, Ordering::Relaxed);
            self.detached.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_detach(&self, separated: bool) {
        self.detached.fetch_add(1, Ordering::Relaxed);
        if separated {
            self.separated.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_adoption(&self, accepted: bool) {
        if accepted {
            self.adopted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.adoptions_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_lookup(&self, found: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if found {
            self.lookup_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Ratio of lookups that found a child
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups.load(Ordering::Relaxed);
        let hits = self.lookup_hits.load(Ordering::Relaxed);
        if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            attached: self.attached.load(Ordering::Relaxed),
            detached: self.detached.load(Ordering::Relaxed),
            replaced: self.replaced.load(Ordering::Relaxed),
            separated: self.separated.load(Ordering::Relaxed),
            adopted: self.adopted.load(Ordering::Relaxed),
            adoptions_rejected: self.adoptions_rejected.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_hits: self.lookup_hits.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.attached.store(0, Ordering::Relaxed);
        self.detached.store(0, Ordering::Relaxed);
        self.replaced.store(0, Ordering::Relaxed);
        self.separated.store(0, Ordering::Relaxed);
        self.adopted.store(0, Ordering::Relaxed);
        self.adoptions_rejected.store(0, Ordering::Relaxed);
        self.lookups.store(0, Ordering::Relaxed);
        self.lookup_hits.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub attached: u64,
    pub detached: u64,
    pub replaced: u64,
    pub separated: u64,
    pub adopted: u64,
    pub adoptions_rejected: u64,
    pub lookups: u64,
    pub lookup_hits: u64,
}

impl MetricsSnapshot {
    /// Children currently attached across all registries, as far as the
    /// counters can tell.
    pub fn live_children(&self) -> u64 {
        self.attached.saturating_sub(self.detached)
    }
}
