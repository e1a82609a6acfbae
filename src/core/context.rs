//! Call-site context attached to every log entry

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a log entry was emitted from.
///
/// Created at the call site and attached to an [`Entry`](super::Entry) at
/// submission. `filename`, `line` and `function` may be cleared by the filter
/// stage when the engine is configured not to report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub category: String,
}

impl Context {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            filename: None,
            line: None,
            function: None,
            category: category.into(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.filename = Some(filename.into());
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// True when no location or function information is present.
    pub fn is_anonymous(&self) -> bool {
        self.filename.is_none() && self.line.is_none() && self.function.is_none()
    }
}

impl fmt::Display for Context {
    /// Formats the location part of the context as `file:line -> Function: name`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(ref filename) = self.filename {
            write!(f, "{}", filename)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
            wrote = true;
        }
        if let Some(ref function) = self.function {
            if wrote {
                write!(f, " -> ")?;
            }
            write!(f, "Function: {}", function)?;
        }
        Ok(())
    }
}
