//! Timestamp formatting utilities
//!
//! Entries are stamped on the producer thread at submission time, so the
//! rendered string is what consumers see regardless of when the entry is
//! drained.

use super::error::{FlogError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const LOCAL_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Timestamp format applied when an entry is submitted
///
/// # Examples
///
/// ```
/// use flog::core::TimestampFormat;
///
/// let stamp = TimestampFormat::Unix.now();
/// assert!(stamp.parse::<i64>().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local wall-clock time with milliseconds: `2025-01-08 10:30:45.123`
    #[default]
    Local,

    /// ISO 8601 UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 UTC: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, rendered in local time
    Custom(String),
}

impl TimestampFormat {
    /// Reject a custom pattern containing an unknown specifier.
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(pattern) = self {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(FlogError::invalid_timestamp_format(pattern.as_str()));
            }
        }
        Ok(())
    }

    /// Render the current time in this format
    #[must_use]
    pub fn now(&self) -> String {
        match self {
            TimestampFormat::Local | TimestampFormat::Custom(_) => self.format_local(&Local::now()),
            _ => self.format_utc(&Utc::now()),
        }
    }

    #[must_use]
    pub fn format_local(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Local => datetime.format(LOCAL_PATTERN).to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut rendered = String::new();
                match write!(rendered, "{}", datetime.format(format_str)) {
                    Ok(()) => rendered,
                    // Unvalidated pattern; keep the producer path panic-free.
                    Err(_) => datetime.format(LOCAL_PATTERN).to_string(),
                }
            }
            _ => self.format_utc(&datetime.with_timezone(&Utc)),
        }
    }

    #[must_use]
    pub fn format_utc(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Local | TimestampFormat::Custom(_) => {
                self.format_local(&datetime.with_timezone(&Local))
            }
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
        }
    }
}
