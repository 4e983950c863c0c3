//! Output format for log entries
//!
//! - Text: human-readable block (default)
//! - Json: one self-describing JSON object per entry

use super::error::Result;
use super::log_entry::LogEntry;
use super::timestamp;

/// Rendering applied to an entry before it reaches a sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    ///
    /// ```text
    /// [2025-01-08T10:30:45Z] ERROR server.rs:88 app::server::run - bind failed
    /// Error: address in use
    /// Payload: {"port":8080}
    /// ```
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45Z","level":"INFO","file":"main.rs",...}`
    Json,
}

impl OutputFormat {
    /// Render an entry. The result has no trailing newline; a multi-line text
    /// block is returned as one string so sinks write it contiguously.
    pub fn render(&self, entry: &LogEntry) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(Self::format_text(entry, entry.level().to_str())),
            OutputFormat::Json => Self::format_json(entry),
        }
    }

    /// Text rendering with a caller-supplied level token (e.g. colorized).
    pub(crate) fn format_text(entry: &LogEntry, level_token: &str) -> String {
        let mut output = format!(
            "[{}] {} {}:{} {} - {}",
            timestamp::format(entry.timestamp()),
            level_token,
            entry.file(),
            entry.line(),
            entry.function(),
            sanitize_message(entry.message())
        );

        if let Some(error) = entry.error() {
            output.push_str("\nError: ");
            output.push_str(&sanitize_message(error));
        }

        if let Some(payload) = entry.payload() {
            output.push_str("\nPayload: ");
            output.push_str(&payload.to_string());
        }

        output
    }

    fn format_json(entry: &LogEntry) -> Result<String> {
        Ok(serde_json::to_string(entry)?)
    }
}

/// Escape line breaks and tabs so a message cannot forge extra log lines.
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
