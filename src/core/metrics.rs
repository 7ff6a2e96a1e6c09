//! Router metrics for observability
//!
//! Counters for records routed, sink deliveries and sink failures. Failures
//! are otherwise invisible to callers of `log()`, so this is the place to
//! check whether a sink is misbehaving.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use rust_log_router::RouterMetrics;
///
/// let metrics = RouterMetrics::new();
/// metrics.record_routed();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.routed(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.failure_rate(), 0.0);
/// ```
#[derive(Debug)]
pub struct RouterMetrics {
    /// Records handed to the router
    routed: AtomicU64,

    /// Successful (record, sink) writes
    delivered: AtomicU64,

    /// Failed (record, sink) writes, including panics
    sink_failures: AtomicU64,

    /// Records written through the fallback channel
    fallback_writes: AtomicU64,
}

impl RouterMetrics {
    pub const fn new() -> Self {
        Self {
            routed: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            fallback_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn routed(&self) -> u64 {
        self.routed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fallback_writes(&self) -> u64 {
        self.fallback_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_routed(&self) -> u64 {
        self.routed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fallback(&self) -> u64 {
        self.fallback_writes.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed share of sink writes as a percentage (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.sink_failures() as f64;
        let total = self.delivered() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RouterMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            routed: AtomicU64::new(self.routed()),
            delivered: AtomicU64::new(self.delivered()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            fallback_writes: AtomicU64::new(self.fallback_writes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.record_sink_failure(), 0);
        assert_eq!(metrics.record_sink_failure(), 1);
        assert_eq!(metrics.sink_failures(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..10 {
            metrics.record_sink_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_clone_is_snapshot() {
        let metrics = RouterMetrics::new();
        metrics.record_routed();

        let snapshot = metrics.clone();
        metrics.record_routed();

        assert_eq!(snapshot.routed(), 1);
        assert_eq!(metrics.routed(), 2);
    }
}
