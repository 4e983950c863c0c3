//! Logger configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference capacity of the asynchronous delivery queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Largest accepted queue capacity. The queue reserves every slot up front.
pub const MAX_QUEUE_CAPACITY: usize = 65_536;

/// Where rendered entries are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Console,
    File,
}

/// Logger configuration, fixed once the logger is built.
///
/// The defaults are console output, human-readable format, minimum level
/// `DEBUG` and synchronous delivery.
///
/// # Example
///
/// ```
/// use callsite_logger::{LogLevel, LoggerConfig};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{"output":"file","file_path":"/tmp/app.log","structured":true,"min_level":"INFO"}"#,
/// ).unwrap();
///
/// assert_eq!(config.min_level, LogLevel::Info);
/// assert!(!config.async_enabled);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub output: OutputMode,
    /// Required when `output` is [`OutputMode::File`]
    pub file_path: Option<PathBuf>,
    /// JSON records instead of human-readable lines
    pub structured: bool,
    pub min_level: LogLevel,
    /// Deliver through a bounded queue drained by one worker thread
    pub async_enabled: bool,
    pub queue_capacity: usize,
    /// Color the level token in human-readable console output
    pub colored: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            output: OutputMode::Console,
            file_path: None,
            structured: false,
            min_level: LogLevel::Debug,
            async_enabled: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            colored: false,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console output with the given minimum level
    pub fn console(min_level: LogLevel) -> Self {
        Self {
            min_level,
            ..Self::default()
        }
    }

    /// File output with the given minimum level
    pub fn file(path: impl Into<PathBuf>, min_level: LogLevel) -> Self {
        Self {
            output: OutputMode::File,
            file_path: Some(path.into()),
            min_level,
            ..Self::default()
        }
    }

    /// Check the configuration before any logger is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.output == OutputMode::File {
            match &self.file_path {
                None => {
                    return Err(LoggerError::config(
                        "LoggerConfig",
                        "file output requires file_path",
                    ))
                }
                Some(path) if path.as_os_str().is_empty() => {
                    return Err(LoggerError::config(
                        "LoggerConfig",
                        "file_path must not be empty",
                    ))
                }
                Some(_) => {}
            }
        }

        if self.async_enabled {
            if self.queue_capacity == 0 {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    "queue_capacity must be greater than zero",
                ));
            }
            if self.queue_capacity > MAX_QUEUE_CAPACITY {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!(
                        "queue_capacity {} exceeds the maximum of {}",
                        self.queue_capacity, MAX_QUEUE_CAPACITY
                    ),
                ));
            }
        }

        Ok(())
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.structured {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
