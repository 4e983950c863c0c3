//! Background delivery queue
//!
//! One worker thread drains a bounded FIFO channel and writes each entry
//! through the logger's appender before taking the next. Producers block when
//! the channel is full. A pending counter, raised before an entry is queued
//! and lowered after it is written, is the drain barrier used by `close`.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    metrics::LoggerMetrics,
};
use crossbeam_channel::{bounded, Sender};
use parking_lot::{Condvar, Mutex, RwLock};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Render and write one entry, reporting failures on stderr.
///
/// A panicking appender is caught here so the caller (or the worker loop)
/// always continues. Returns whether the write succeeded.
pub(crate) fn write_entry(
    appender: &dyn Appender,
    entry: &LogEntry,
    metrics: &LoggerMetrics,
) -> bool {
    let result =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.append(entry)));

    match result {
        Ok(Ok(())) => {
            metrics.record_written();
            true
        }
        Ok(Err(e)) => {
            eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
            metrics.record_failed();
            false
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                appender.name(),
                panic_msg
            );
            metrics.record_failed();
            false
        }
    }
}

/// Count of entries queued but not yet written.
#[derive(Debug, Default)]
pub(crate) struct PendingCount {
    count: Mutex<usize>,
    drained: Condvar,
}

impl PendingCount {
    pub(crate) fn increment(&self) {
        *self.count.lock() += 1;
    }

    pub(crate) fn decrement(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.drained.notify_all();
        }
    }

    pub(crate) fn get(&self) -> usize {
        *self.count.lock()
    }

    /// Block until the count is zero. Returns `false` if `timeout` elapsed
    /// first.
    pub(crate) fn wait_for_zero(&self, timeout: Option<Duration>) -> bool {
        let mut count = self.count.lock();
        match timeout {
            None => {
                self.drained.wait_while(&mut count, |pending| *pending > 0);
                true
            }
            Some(timeout) => {
                let result = self
                    .drained
                    .wait_while_for(&mut count, |pending| *pending > 0, timeout);
                !result.timed_out() || *count == 0
            }
        }
    }
}

/// Bounded queue plus the single thread that drains it.
pub(crate) struct AsyncWorker {
    sender: RwLock<Option<Sender<LogEntry>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    pending: Arc<PendingCount>,
    metrics: Arc<LoggerMetrics>,
}

impl AsyncWorker {
    pub(crate) fn spawn(
        capacity: usize,
        appender: Arc<dyn Appender>,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        let (sender, receiver) = bounded::<LogEntry>(capacity);
        let pending = Arc::new(PendingCount::default());
        let pending_clone = Arc::clone(&pending);
        let metrics_clone = Arc::clone(&metrics);

        let handle = thread::Builder::new()
            .name("callsite-logger-worker".to_string())
            .spawn(move || {
                // Ends once every sender is dropped and the channel is empty
                for entry in receiver.iter() {
                    write_entry(appender.as_ref(), &entry, &metrics_clone);
                    pending_clone.decrement();
                }
            })
            .map_err(|e| LoggerError::io_operation("spawning worker thread", "async delivery", e))?;

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
            pending,
            metrics,
        })
    }

    /// Queue an entry, blocking while the queue is full.
    ///
    /// Hands the entry back if the worker has been closed.
    pub(crate) fn submit(&self, entry: LogEntry) -> std::result::Result<(), LogEntry> {
        // Clone out of the lock so a blocked send never holds it
        let sender = match self.sender.read().as_ref() {
            Some(sender) => sender.clone(),
            None => return Err(entry),
        };

        self.pending.increment();
        match sender.send(entry) {
            Ok(()) => {
                self.metrics.record_enqueued();
                Ok(())
            }
            Err(err) => {
                self.pending.decrement();
                Err(err.into_inner())
            }
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.pending.get()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Drain, disconnect the queue and join the worker.
    ///
    /// With a timeout, a worker that has not drained in time is detached and
    /// `false` is returned. Calling this again after it has completed is a
    /// no-op returning `true`.
    pub(crate) fn close(&self, timeout: Option<Duration>) -> bool {
        let drained = self.pending.wait_for_zero(timeout);

        drop(self.sender.write().take());

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if !drained {
                eprintln!(
                    "[LOGGER WARNING] Async worker did not drain within {:?}; \
                     {} entries may be lost.",
                    timeout.unwrap_or_default(),
                    self.pending.get()
                );
                return false;
            }

            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Async worker thread panicked during shutdown: {:?}", e);
                return false;
            }
        }

        drained
    }
}
