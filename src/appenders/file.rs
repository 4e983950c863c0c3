//! File appender implementation
//!
//! Every entry is its own open/append/close cycle: no handle is held between
//! writes, so the file may be moved or truncated by another process at any
//! time and the next entry simply recreates it.

use crate::core::{Appender, LogEntry, LoggerError, OutputFormat, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileAppender {
    path: PathBuf,
    output_format: OutputFormat,
}

impl FileAppender {
    /// Create an appender for `path`. The file is not touched until the first
    /// entry is written.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(LoggerError::config("FileAppender", "path must not be empty"));
        }

        Ok(Self {
            path,
            output_format: OutputFormat::default(),
        })
    }

    /// Set the output format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use callsite_logger::appenders::FileAppender;
    /// use callsite_logger::OutputFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_block(&self, output: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("opening log file", e))?;

        #[cfg(feature = "file")]
        fs2::FileExt::lock_exclusive(&file).map_err(|e| self.io_error("locking log file", e))?;

        let mut buffer = String::with_capacity(output.len() + 1);
        buffer.push_str(output);
        buffer.push('\n');

        // The lock is released when `file` is closed at the end of scope
        file.write_all(buffer.as_bytes())
            .map_err(|e| self.io_error("writing log file", e))
    }

    fn io_error(&self, operation: &str, source: std::io::Error) -> LoggerError {
        LoggerError::io_operation(operation, self.path.display().to_string(), source)
    }
}

impl Appender for FileAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let output = self.output_format.render(entry)?;
        self.write_block(&output)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Origin, Payload};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_created_and_appended() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");
        let appender = FileAppender::new(&log_path)?;

        for i in 0..3 {
            let entry = LogEntry::new(
                LogLevel::Info,
                Origin::caller(),
                format!("entry {}", i),
                None,
                None,
            );
            appender.append(&entry)?;
        }

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("- entry 2"));
        assert!(content.ends_with('\n'));
        Ok(())
    }

    #[test]
    fn test_file_recreated_after_removal() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("rotated.log");
        let appender = FileAppender::new(&log_path)?;

        let entry = LogEntry::new(LogLevel::Info, Origin::caller(), "before", None, None);
        appender.append(&entry)?;
        fs::rename(&log_path, dir.path().join("rotated.log.1"))?;

        let entry = LogEntry::new(LogLevel::Info, Origin::caller(), "after", None, None);
        appender.append(&entry)?;

        let content = fs::read_to_string(&log_path)?;
        assert!(content.contains("after"));
        assert!(!content.contains("before"));
        Ok(())
    }

    #[test]
    fn test_json_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.jsonl");
        let appender = FileAppender::new(&log_path)?.with_output_format(OutputFormat::Json);

        let payload = Payload::new().with_field("user_id", 123);
        let entry = LogEntry::new(LogLevel::Warn, Origin::caller(), "slow", Some(payload), None);
        appender.append(&entry)?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: serde_json::Value = serde_json::from_str(content.trim_end())?;
        assert_eq!(parsed["payload"]["user_id"], 123);
        Ok(())
    }

    #[test]
    fn test_unwritable_path_returns_error() {
        let dir = tempdir().unwrap();
        let appender = FileAppender::new(dir.path().join("missing").join("app.log")).unwrap();
        let entry = LogEntry::new(LogLevel::Info, Origin::caller(), "x", None, None);

        let err = appender.append(&entry).unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(FileAppender::new("").is_err());
    }
}
