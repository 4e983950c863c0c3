//! Logger metrics for observability
//!
//! Counters for entries that reached a sink, entries whose write failed, and
//! entries handed to the background worker.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use callsite_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries rendered and written by a sink
    written_count: AtomicU64,

    /// Entries whose render or write failed (reported on stderr)
    failed_count: AtomicU64,

    /// Entries pushed onto the asynchronous queue
    enqueued_count: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            written_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
            enqueued_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued_count.load(Ordering::Relaxed)
    }

    /// Record a written entry, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed entry, returning the previous count
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed entries as a percentage (0.0 - 100.0) of all delivered entries
    ///
    /// Returns 0.0 if nothing has been delivered yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count() as f64;
        let total = self.written_count() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            written_count: AtomicU64::new(self.written_count()),
            failed_count: AtomicU64::new(self.failed_count()),
            enqueued_count: AtomicU64::new(self.enqueued_count()),
        }
    }
}
