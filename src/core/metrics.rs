//! Engine metrics for observability
//!
//! Counters are updated with relaxed atomics: producers touch `submitted`,
//! everything else is written by the drain thread only.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing engine activity
///
/// # Example
///
/// ```
/// use flog::EngineMetrics;
///
/// let metrics = EngineMetrics::new();
/// metrics.record_submitted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.submitted(), 1);
/// assert_eq!(metrics.filter_rate(), 100.0);
/// ```
#[derive(Debug)]
pub struct EngineMetrics {
    /// Entries handed to the queue
    submitted: AtomicU64,

    /// Entries that passed the filter stage and were fanned out
    dispatched: AtomicU64,

    /// Entries dropped by the filter stage
    filtered: AtomicU64,

    /// Individual consumer failures (errors and panics)
    consumer_failures: AtomicU64,

    /// Completed swap-and-dispatch cycles of the drain thread
    drain_cycles: AtomicU64,
}

impl EngineMetrics {
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            consumer_failures: AtomicU64::new(0),
            drain_cycles: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn consumer_failures(&self) -> u64 {
        self.consumer_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn drain_cycles(&self) -> u64 {
        self.drain_cycles.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_consumer_failure(&self) -> u64 {
        self.consumer_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_drain_cycle(&self) -> u64 {
        self.drain_cycles.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of drained entries dropped by the filter stage, as a percentage
    ///
    /// Returns 0.0 if nothing has been drained yet.
    pub fn filter_rate(&self) -> f64 {
        let filtered = self.filtered() as f64;
        let total = self.dispatched() as f64 + filtered;
        if total == 0.0 {
            0.0
        } else {
            (filtered / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.submitted.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.consumer_failures.store(0, Ordering::Relaxed);
        self.drain_cycles.store(0, Ordering::Relaxed);
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EngineMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted()),
            dispatched: AtomicU64::new(self.dispatched()),
            filtered: AtomicU64::new(self.filtered()),
            consumer_failures: AtomicU64::new(self.consumer_failures()),
            drain_cycles: AtomicU64::new(self.drain_cycles()),
        }
    }
}
