//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink that renders and writes one entry per call.
///
/// Appenders are shared between caller threads (synchronous mode) and the
/// background worker (asynchronous mode), so `append` takes `&self`.
/// Errors are reported to stderr by the logger, never to the log caller.
pub trait Appender: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;
    fn name(&self) -> &str;
}
