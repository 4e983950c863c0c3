//! Main logger implementation

use super::{
    appender::Appender,
    config::{LoggerConfig, OutputMode},
    error::Result,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    origin::Origin,
    payload::Payload,
    worker::{write_entry, AsyncWorker},
};
use crate::appenders::{ConsoleAppender, FileAppender};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Shutdown timeout used when a logger is dropped without calling `close`.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Process exit status used by [`Logger::fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// The dispatcher: gates, builds and delivers log entries.
///
/// Configuration is fixed at construction. In asynchronous mode entries go
/// through a bounded queue to a single worker thread; call [`Logger::close`]
/// before the process exits or queued entries may be lost. Logging after
/// `close` is not supported; such entries are written synchronously.
///
/// The per-level methods record the call site's file and line with the
/// function as `unknown`; the [`info!`](crate::info) family of macros also
/// records the enclosing function.
pub struct Logger {
    config: LoggerConfig,
    appender: Arc<dyn Appender>,
    worker: Option<AsyncWorker>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Build a logger from a configuration, validating it first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use callsite_logger::{LogLevel, Logger, LoggerConfig, Payload};
    ///
    /// let mut config = LoggerConfig::file("/tmp/app.log", LogLevel::Info);
    /// config.async_enabled = true;
    ///
    /// let logger = Logger::new(config).expect("valid config");
    /// logger.info("service started", Some(Payload::new().with_field("port", 8080)));
    /// logger.close();
    /// ```
    pub fn new(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_parts(
        config: LoggerConfig,
        appender: Arc<dyn Appender>,
        worker: Option<AsyncWorker>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            config,
            appender,
            worker,
            metrics,
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn min_level(&self) -> LogLevel {
        self.config.min_level
    }

    /// Level gate for this logger
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.is_enabled(self.config.min_level)
    }

    pub fn is_async(&self) -> bool {
        self.worker.is_some()
    }

    /// Entries queued but not yet written; always 0 in synchronous mode.
    pub fn pending(&self) -> usize {
        self.worker.as_ref().map_or(0, AsyncWorker::pending)
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, message: impl Into<String>, payload: Option<Payload>) {
        self.log_from_caller(LogLevel::Debug, message, payload, None);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: impl Into<String>, payload: Option<Payload>) {
        self.log_from_caller(LogLevel::Info, message, payload, None);
    }

    #[track_caller]
    #[inline]
    pub fn warn(&self, message: impl Into<String>, payload: Option<Payload>) {
        self.log_from_caller(LogLevel::Warn, message, payload, None);
    }

    #[track_caller]
    #[inline]
    pub fn error(
        &self,
        message: impl Into<String>,
        err: Option<&dyn Error>,
        payload: Option<Payload>,
    ) {
        self.log_from_caller(LogLevel::Error, message, payload, err);
    }

    /// Log at FATAL, drain pending entries, then exit with [`FATAL_EXIT_CODE`].
    #[track_caller]
    pub fn fatal(
        &self,
        message: impl Into<String>,
        err: Option<&dyn Error>,
        payload: Option<Payload>,
    ) -> ! {
        self.fatal_at(Origin::caller(), message, err, payload)
    }

    /// [`Logger::fatal`] with an explicit origin; used by the `fatal!` macro.
    pub fn fatal_at(
        &self,
        origin: Origin,
        message: impl Into<String>,
        err: Option<&dyn Error>,
        payload: Option<Payload>,
    ) -> ! {
        self.log_fatal(origin, message, err, payload);
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// The part of the fatal path that runs before the process exits: write
    /// the FATAL entry, then drain and close the queue.
    pub fn log_fatal(
        &self,
        origin: Origin,
        message: impl Into<String>,
        err: Option<&dyn Error>,
        payload: Option<Payload>,
    ) {
        self.log_at(origin, LogLevel::Fatal, message, payload, err);
        self.close();
    }

    #[track_caller]
    fn log_from_caller(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        payload: Option<Payload>,
        err: Option<&dyn Error>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        self.log_at(Origin::caller(), level, message, payload, err);
    }

    /// Log with an explicit origin. Entry point for the logging macros.
    pub fn log_at(
        &self,
        origin: Origin,
        level: LogLevel,
        message: impl Into<String>,
        payload: Option<Payload>,
        err: Option<&dyn Error>,
    ) {
        if !self.is_enabled(level) {
            return;
        }

        let entry = LogEntry::new(level, origin, message, payload, err);
        self.send_entry(entry);
    }

    fn send_entry(&self, entry: LogEntry) {
        let entry = match self.worker {
            Some(ref worker) => match worker.submit(entry) {
                Ok(()) => return,
                // Closed: fall back to writing on the caller's thread
                Err(entry) => entry,
            },
            None => entry,
        };

        write_entry(self.appender.as_ref(), &entry, &self.metrics);
    }

    /// Block until every queued entry is written, then stop the worker.
    ///
    /// No-op in synchronous mode and on repeated calls. Waits without a time
    /// limit; see [`Logger::close_timeout`] for a bounded variant.
    pub fn close(&self) {
        if let Some(ref worker) = self.worker {
            worker.close(None);
        }
    }

    /// Like [`Logger::close`], giving up after `timeout`.
    ///
    /// Returns `true` if every queued entry was written.
    ///
    /// # Example
    ///
    /// ```
    /// use callsite_logger::Logger;
    /// use std::time::Duration;
    ///
    /// let logger = Logger::builder().async_mode(16).build().unwrap();
    /// logger.info("shutting down", None);
    ///
    /// if !logger.close_timeout(Duration::from_secs(10)) {
    ///     eprintln!("Warning: log queue did not drain");
    /// }
    /// ```
    pub fn close_timeout(&self, timeout: Duration) -> bool {
        match self.worker {
            Some(ref worker) => worker.close(Some(timeout)),
            None => true,
        }
    }
}

/// Synchronous console logger with the default configuration.
impl Default for Logger {
    fn default() -> Self {
        let config = LoggerConfig::default();
        let appender = ConsoleAppender::new().with_output_format(config.output_format());
        Self::from_parts(
            config,
            Arc::new(appender),
            None,
            Arc::new(LoggerMetrics::new()),
        )
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(ref worker) = self.worker {
            if !worker.is_closed() {
                worker.close(Some(DEFAULT_SHUTDOWN_TIMEOUT));
            }
        }

        let failed = self.metrics.failed_count();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} failed writes \
                 (failure rate: {:.2}%)",
                failed,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use callsite_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .structured(true)
///     .async_mode(100)
///     .build()
///     .expect("valid config");
///
/// logger.debug("filtered out", None);
/// logger.close();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    appender: Option<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            appender: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Write to standard output
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self) -> Self {
        self.config.output = OutputMode::Console;
        self
    }

    /// Append to the file at `path`
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = OutputMode::File;
        self.config.file_path = Some(path.into());
        self
    }

    /// Render JSON records instead of human-readable lines
    #[must_use = "builder methods return a new value"]
    pub fn structured(mut self, structured: bool) -> Self {
        self.config.structured = structured;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colored(mut self, colored: bool) -> Self {
        self.config.colored = colored;
        self
    }

    /// Enable async mode with the given queue capacity
    ///
    /// If not called, the logger will use synchronous mode.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, queue_capacity: usize) -> Self {
        self.config.async_enabled = true;
        self.config.queue_capacity = queue_capacity;
        self
    }

    /// Replace the sink derived from the output mode with a custom appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Build the Logger
    ///
    /// Fails if the configuration is invalid or the worker thread cannot be
    /// started.
    pub fn build(self) -> Result<Logger> {
        let config = self.config;
        config.validate()?;

        let appender: Arc<dyn Appender> = match self.appender {
            Some(custom) => Arc::from(custom),
            None => Self::default_appender(&config)?,
        };

        let metrics = Arc::new(LoggerMetrics::new());
        let worker = if config.async_enabled {
            Some(AsyncWorker::spawn(
                config.queue_capacity,
                Arc::clone(&appender),
                Arc::clone(&metrics),
            )?)
        } else {
            None
        };

        Ok(Logger::from_parts(config, appender, worker, metrics))
    }

    fn default_appender(config: &LoggerConfig) -> Result<Arc<dyn Appender>> {
        let format = config.output_format();
        match (config.output, &config.file_path) {
            (OutputMode::File, Some(path)) => Ok(Arc::new(
                FileAppender::new(path.clone())?.with_output_format(format),
            )),
            // validate() rejects file output without a path
            _ => Ok(Arc::new(
                ConsoleAppender::new()
                    .with_output_format(format)
                    .with_colors(config.colored),
            )),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
