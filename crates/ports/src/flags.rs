//! Output format options.

use std::fmt;
use std::ops::BitOr;

/// Bitset of output options, or'ed together to control the log format.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u32);

impl Flags {
    /// Include the event timestamp.
    pub const TIMESTAMP: Self = Self(1);
    /// Render events as JSON objects instead of `key=value` text.
    pub const JSON: Self = Self(1 << 1);
    /// Initial flags of a freshly created state.
    pub const STD: Self = Self::TIMESTAMP;

    /// No options: plain text without timestamp.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns true when every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set or clear the bits of `other`.
    #[must_use]
    pub const fn with(self, other: Self, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | other.0)
        } else {
            Self(self.0 & !other.0)
        }
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::TIMESTAMP) {
            names.push("TIMESTAMP");
        }
        if self.contains(Self::JSON) {
            names.push("JSON");
        }
        if names.is_empty() {
            return formatter.write_str("Flags(empty)");
        }
        write!(formatter, "Flags({})", names.join(" | "))
    }
}
