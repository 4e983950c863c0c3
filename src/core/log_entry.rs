//! Log entry structure

use super::log_level::LogLevel;
use super::origin::Origin;
use super::payload::Payload;
use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// One log event. Built once by the dispatcher and never mutated afterwards.
///
/// Field names in the serialized form are `timestamp`, `level`, `file`,
/// `line`, `function`, `message`, `payload`, `error` and `pid`. `payload` is
/// left out when absent or empty, `error` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(with = "timestamp::serde_rfc3339")]
    timestamp: DateTime<Utc>,
    level: LogLevel,
    file: String,
    line: u32,
    function: String,
    message: String,
    #[serde(default, skip_serializing_if = "payload_is_empty")]
    payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    pid: u32,
}

fn payload_is_empty(payload: &Option<Payload>) -> bool {
    match payload {
        Some(payload) => payload.is_empty(),
        None => true,
    }
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        origin: Origin,
        message: impl Into<String>,
        payload: Option<Payload>,
        error: Option<&dyn Error>,
    ) -> Self {
        Self {
            timestamp: timestamp::now(),
            level,
            file: origin.file().to_string(),
            line: origin.line(),
            function: origin.function().to_string(),
            message: message.into(),
            payload,
            error: error.map(|e| e.to_string()).filter(|d| !d.is_empty()),
            pid: std::process::id(),
        }
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Attached error description, never empty.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}
