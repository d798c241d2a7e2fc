//! Log levels and threshold ordering.

use std::fmt;
use std::str::FromStr;

/// Log level.
///
/// Ordered `Debug < Info < Discard`. `Discard` is only meaningful as a
/// threshold: it rejects every event and is never the level of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Conditions of interest to developers.
    Debug,
    /// Conditions of interest to users.
    Info,
    /// Threshold sentinel that silences all output.
    Discard,
}

impl Level {
    /// Returns true when an event at `self` passes the `threshold`.
    #[must_use]
    pub fn passes(self, threshold: Self) -> bool {
        self != Self::Discard && self >= threshold
    }

    /// Lowercase name used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Discard => "discard",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "discard" | "off" | "none" => Ok(Self::Discard),
            _ => Err(LevelParseError {
                value: input.to_string(),
            }),
        }
    }
}

/// Returned when a string does not name a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    value: String,
}

impl LevelParseError {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unsupported log level {:?} (expected debug, info or discard)",
            self.value
        )
    }
}

impl std::error::Error for LevelParseError {}
