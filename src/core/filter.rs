//! Drain-time filtering and redaction
//!
//! Every drained entry goes through [`FilterConfig::apply`] before it reaches
//! a consumer. Checks run cheapest first and stop at the first rejection:
//! verbosity, category, filename, message. Accepted entries then have their
//! location or function stripped according to the reporting flags.

use super::entry::Entry;
use super::error::{FlogError, Result};
use super::kind::Kind;
use regex::Regex;

/// Which field of an entry a regex filter is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterAxis {
    Category,
    Filename,
    Message,
}

impl FilterAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterAxis::Category => "category",
            FilterAxis::Filename => "filename",
            FilterAxis::Message => "message",
        }
    }

    /// Compile a pattern for this axis, naming the axis in the error.
    pub fn compile(self, pattern: &str) -> Result<Regex> {
        Regex::new(pattern).map_err(|e| FlogError::invalid_filter(self.as_str(), e))
    }
}

/// Runtime filtering configuration.
///
/// A `None` filter never rejects anything on its axis.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub verbosity: Kind,
    pub report_filenames: bool,
    pub report_functions: bool,
    pub category_filter: Option<Regex>,
    pub filename_filter: Option<Regex>,
    pub message_filter: Option<Regex>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            verbosity: Kind::Info,
            report_filenames: false,
            report_functions: true,
            category_filter: None,
            filename_filter: None,
            message_filter: None,
        }
    }
}

/// Outcome of running an entry through the filter stage
#[derive(Debug)]
pub enum Verdict {
    Accept(Entry),
    Reject(Rejection),
}

/// Why an entry was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Verbosity,
    Filter(FilterAxis),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }

    pub fn accepted(self) -> Option<Entry> {
        match self {
            Verdict::Accept(entry) => Some(entry),
            Verdict::Reject(_) => None,
        }
    }
}

impl FilterConfig {
    pub fn filter(&self, axis: FilterAxis) -> Option<&Regex> {
        match axis {
            FilterAxis::Category => self.category_filter.as_ref(),
            FilterAxis::Filename => self.filename_filter.as_ref(),
            FilterAxis::Message => self.message_filter.as_ref(),
        }
    }

    pub fn set_filter(&mut self, axis: FilterAxis, regex: Option<Regex>) {
        let slot = match axis {
            FilterAxis::Category => &mut self.category_filter,
            FilterAxis::Filename => &mut self.filename_filter,
            FilterAxis::Message => &mut self.message_filter,
        };
        *slot = regex;
    }

    pub fn clear_filters(&mut self) {
        self.category_filter = None;
        self.filename_filter = None;
        self.message_filter = None;
    }

    /// Run one entry through the filter stage
    pub fn apply(&self, mut entry: Entry) -> Verdict {
        if !entry.kind.admits(self.verbosity) {
            return Verdict::Reject(Rejection::Verbosity);
        }

        if let Some(ref re) = self.category_filter {
            if !re.is_match(&entry.context.category) {
                return Verdict::Reject(Rejection::Filter(FilterAxis::Category));
            }
        }

        if let Some(ref re) = self.filename_filter {
            let matched = entry
                .context
                .filename
                .as_deref()
                .is_some_and(|filename| re.is_match(filename));
            if !matched {
                return Verdict::Reject(Rejection::Filter(FilterAxis::Filename));
            }
        }

        if let Some(ref re) = self.message_filter {
            if !re.is_match(&entry.message) {
                return Verdict::Reject(Rejection::Filter(FilterAxis::Message));
            }
        }

        if !self.report_filenames {
            entry.context.filename = None;
            entry.context.line = None;
        }
        if !self.report_functions {
            entry.context.function = None;
        }

        Verdict::Accept(entry)
    }
}
