//! Console appender implementation

use crate::core::{Appender, LogEntry, OutputFormat, Result};
use std::io::Write;

pub struct ConsoleAppender {
    use_colors: bool,
    output_format: OutputFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: false,
            output_format: OutputFormat::default(),
        }
    }

    /// Color the level token in text output. Ignored for JSON and when the
    /// `console` feature is off.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use callsite_logger::appenders::ConsoleAppender;
    /// use callsite_logger::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    fn render(&self, entry: &LogEntry) -> Result<String> {
        if self.use_colors && self.output_format == OutputFormat::Text {
            if let Some(output) = Self::colored_text(entry) {
                return Ok(output);
            }
        }

        self.output_format.render(entry)
    }

    #[cfg(feature = "console")]
    fn colored_text(entry: &LogEntry) -> Option<String> {
        use colored::Colorize;
        let level = entry.level().to_str().color(entry.level().color_code());
        Some(OutputFormat::format_text(entry, &level.to_string()))
    }

    #[cfg(not(feature = "console"))]
    fn colored_text(_entry: &LogEntry) -> Option<String> {
        None
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let output = self.render(entry)?;

        // One locked write per entry keeps multi-line blocks together
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", output)?;
        handle.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
