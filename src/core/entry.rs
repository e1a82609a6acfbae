//! Log entry structure

use super::context::Context;
use super::kind::Kind;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// One log event.
///
/// Built on the producer thread, then owned by the queue and finally by the
/// drain thread. Only the filter stage mutates it, and only its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub message: String,
    pub context: Context,
    pub kind: Kind,
    pub timestamp: String,
}

impl Entry {
    /// Create an entry stamped with the current local time
    pub fn new(kind: Kind, message: impl Into<String>, context: Context) -> Self {
        Self::stamped(kind, message, context, &TimestampFormat::default())
    }

    pub fn stamped(
        kind: Kind,
        message: impl Into<String>,
        context: Context,
        format: &TimestampFormat,
    ) -> Self {
        Self {
            message: message.into(),
            context,
            kind,
            timestamp: format.now(),
        }
    }

    pub fn category(&self) -> &str {
        &self.context.category
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry() {
        let entry = Entry::new(Kind::Error, "disk full", Context::new("io"));
        assert_eq!(entry.kind, Kind::Error);
        assert_eq!(entry.message, "disk full");
        assert_eq!(entry.category(), "io");
        assert!(!entry.timestamp.is_empty());
    }

    #[test]
    fn test_json_omits_missing_location() {
        let entry = Entry::new(Kind::Info, "hello", Context::new("ui"));
        let json = entry.to_json().expect("serializable entry");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["kind"], "Info");
        assert_eq!(value["context"]["category"], "ui");
        assert!(value["context"].get("filename").is_none());
    }
}
