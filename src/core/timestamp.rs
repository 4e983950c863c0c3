//! Timestamp handling for log entries
//!
//! Entries carry a UTC instant truncated to whole seconds and always render it
//! as RFC 3339 with a `Z` suffix (`2025-01-08T10:30:45Z`). Because sub-second
//! precision is dropped at capture time, the rendered form parses back to the
//! exact same instant.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Capture the current instant at the precision entries store.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Render a timestamp in the fixed log format.
///
/// # Examples
///
/// ```
/// use callsite_logger::core::timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(timestamp::format(&ts), "2025-01-08T10:30:45Z");
/// ```
#[must_use]
pub fn format(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC 3339 timestamp, normalizing any offset to UTC.
pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter keeping the JSON timestamp in the same format as text output.
pub(crate) mod serde_rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}
