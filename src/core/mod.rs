//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod located_error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod origin;
pub mod output_format;
pub mod payload;
pub mod timestamp;
mod worker;

pub use appender::Appender;
pub use config::{LoggerConfig, OutputMode, DEFAULT_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY};
pub use error::{LoggerError, Result};
pub use located_error::{wrap_error, BoxError, LocatedError, ResultExt};
pub use log_entry::LogEntry;
pub use log_level::{enabled, LogLevel};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use origin::Origin;
pub use output_format::OutputFormat;
pub use payload::Payload;
