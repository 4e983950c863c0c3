//! Process-wide logger
//!
//! [`init`] publishes one [`Logger`] for the whole process. It may be called
//! at most once, before any logging; the free functions here and
//! [`logger()`] then read it from any thread. If `init` is never called the
//! first use installs the default configuration (console, text, DEBUG,
//! synchronous).
//!
//! The global logger is never dropped. With asynchronous delivery enabled,
//! call [`close_logger`] before the process exits or queued entries are lost.
//!
//! The functions below record the caller's file and line but log the function
//! as `unknown`. To record the enclosing function as well, pass [`logger()`]
//! to the macros: `info!(global::logger(), "listening on {}", port)`.
//!
//! ```no_run
//! use callsite_logger::{global, LogLevel, LoggerConfig, Payload};
//!
//! let mut config = LoggerConfig::file("/tmp/t.log", LogLevel::Info);
//! config.async_enabled = true;
//! global::init(config).expect("logger configured once");
//!
//! global::debug("x", None);
//! global::info("y", Some(Payload::new().with_field("k", 1)));
//! global::close_logger();
//! ```

use crate::core::{Logger, LoggerBuilder, LoggerConfig, LoggerError, Payload, Result};
use std::error::Error;
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Configure the process-wide logger.
///
/// Fails with [`LoggerError::AlreadyInitialized`] on a second call or after
/// the default logger has been installed by an earlier log call.
pub fn init(config: LoggerConfig) -> Result<()> {
    init_with(LoggerBuilder::from_config(config))
}

/// Configure the process-wide logger from a builder (e.g. one carrying a
/// custom appender).
pub fn init_with(builder: LoggerBuilder) -> Result<()> {
    if GLOBAL_LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let logger = builder.build()?;
    // A concurrent init may have won the race; the loser's logger is dropped
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The process-wide logger, installing the default one if needed.
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(Logger::default)
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Log at DEBUG. The function is recorded as `unknown`; use
/// `debug!(global::logger(), ...)` to capture it.
#[track_caller]
pub fn debug(message: impl Into<String>, payload: Option<Payload>) {
    logger().debug(message, payload);
}

/// Log at INFO. The function is recorded as `unknown`; use
/// `info!(global::logger(), ...)` to capture it.
#[track_caller]
pub fn info(message: impl Into<String>, payload: Option<Payload>) {
    logger().info(message, payload);
}

/// Log at WARN. The function is recorded as `unknown`; use
/// `warn!(global::logger(), ...)` to capture it.
#[track_caller]
pub fn warn(message: impl Into<String>, payload: Option<Payload>) {
    logger().warn(message, payload);
}

/// Log at ERROR with an optional error description. The function is recorded
/// as `unknown`; use `error!(global::logger(), err = &e; ...)` to capture it.
#[track_caller]
pub fn error(message: impl Into<String>, err: Option<&dyn Error>, payload: Option<Payload>) {
    logger().error(message, err, payload);
}

/// Log at FATAL, drain the queue and exit the process with status 1.
///
/// The function is recorded as `unknown`; `fatal!(global::logger(), ...)`
/// captures it.
#[track_caller]
pub fn fatal(message: impl Into<String>, err: Option<&dyn Error>, payload: Option<Payload>) -> ! {
    logger().fatal(message, err, payload)
}

/// Drain and stop the global worker. No-op when delivery is synchronous or
/// the logger was never initialized.
pub fn close_logger() {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.close();
    }
}
