//! Log entry kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a log entry, ordered by priority.
///
/// `Error` has the highest priority and the lowest discriminant, so a
/// verbosity threshold admits every kind that compares `<=` to it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Kind {
    Error = 0,
    Warning = 1,
    #[default]
    Info = 2,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Error, Kind::Warning, Kind::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Error => "ERROR",
            Kind::Warning => "WARNING",
            Kind::Info => "INFO",
        }
    }

    pub fn from_u8(value: u8) -> Option<Kind> {
        match value {
            0 => Some(Kind::Error),
            1 => Some(Kind::Warning),
            2 => Some(Kind::Info),
            _ => None,
        }
    }

    /// Returns true if an entry of this kind passes the given verbosity threshold.
    #[inline]
    pub fn admits(self, verbosity: Kind) -> bool {
        self <= verbosity
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Kind::Error => Red,
            Kind::Warning => Yellow,
            Kind::Info => Green,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Kind::Error),
            "WARNING" | "WARN" => Ok(Kind::Warning),
            "INFO" => Ok(Kind::Info),
            _ => Err(format!("Invalid log kind: '{}'", s)),
        }
    }
}
