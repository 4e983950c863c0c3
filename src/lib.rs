//! # callsite_logger
//!
//! A small process-wide structured logger.
//!
//! ## Features
//!
//! - **Call-site capture**: every entry records file, line and function of the
//!   logging call
//! - **Two formats**: human-readable blocks or one JSON object per entry
//! - **Two sinks**: standard output, or a file opened and closed per write
//! - **Optional async delivery**: one worker thread behind a bounded FIFO
//!   queue, drained by `close`
//! - **Fail-safe**: write failures go to stderr and never reach the caller
//!
//! ```
//! use callsite_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Info)
//!     .async_mode(DEFAULT_QUEUE_CAPACITY)
//!     .build()?;
//!
//! logger.debug("suppressed", None);
//! logger.info("request served", Some(Payload::new().with_field("status", 200)));
//! logger.close();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        enabled, wrap_error, Appender, LocatedError, LogEntry, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Origin, OutputFormat, OutputMode, Payload,
        Result, ResultExt, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT, MAX_QUEUE_CAPACITY,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use self::core::{
    enabled, wrap_error, Appender, BoxError, LocatedError, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Origin, OutputFormat, OutputMode,
    Payload, Result, ResultExt, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    FATAL_EXIT_CODE, MAX_QUEUE_CAPACITY,
};
pub use global::{close_logger, init, logger};
