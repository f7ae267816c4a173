//! Header flags
//!
//! A small bit set selecting which header fields precede each record. The
//! bit order is also the order in which the fields are rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct LogFlags(u32);

impl LogFlags {
    /// `YYYY/MM/DD `
    pub const DATE: LogFlags = LogFlags(1 << 0);
    /// `HH:MM:SS `
    pub const TIME: LogFlags = LogFlags(1 << 1);
    /// `.µµµµµµ` after the time; implies the time field
    pub const MICROSECONDS: LogFlags = LogFlags(1 << 2);
    /// Full caller path
    pub const LONG_FILE: LogFlags = LogFlags(1 << 3);
    /// Caller file name only; overrides `LONG_FILE`
    pub const SHORT_FILE: LogFlags = LogFlags(1 << 4);
    /// `[module] ` derived from the caller path
    pub const MODULE: LogFlags = LogFlags(1 << 5);
    /// Fixed-width level label
    pub const LEVEL: LogFlags = LogFlags(1 << 6);

    pub const STD: LogFlags = LogFlags(Self::DATE.0 | Self::TIME.0);
    pub const DEFAULT: LogFlags = LogFlags(Self::LEVEL.0 | Self::SHORT_FILE.0 | Self::STD.0);

    const ALL_BITS: u32 = (1 << 7) - 1;

    #[inline]
    pub const fn empty() -> Self {
        LogFlags(0)
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Build from raw bits; unknown bits are discarded.
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        LogFlags(bits & Self::ALL_BITS)
    }

    /// True when every bit of `other` is set.
    #[inline]
    pub const fn contains(&self, other: LogFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set.
    #[inline]
    pub const fn intersects(&self, other: LogFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether rendering needs the caller's file and line.
    #[inline]
    pub const fn wants_location(&self) -> bool {
        self.intersects(LogFlags(Self::LONG_FILE.0 | Self::SHORT_FILE.0 | Self::MODULE.0))
    }
}

impl Default for LogFlags {
    fn default() -> Self {
        LogFlags::DEFAULT
    }
}

impl From<u32> for LogFlags {
    fn from(bits: u32) -> Self {
        LogFlags::from_bits_truncate(bits)
    }
}

impl From<LogFlags> for u32 {
    fn from(flags: LogFlags) -> Self {
        flags.bits()
    }
}

impl BitOr for LogFlags {
    type Output = LogFlags;

    fn bitor(self, rhs: LogFlags) -> LogFlags {
        LogFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogFlags {
    fn bitor_assign(&mut self, rhs: LogFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LogFlags {
    type Output = LogFlags;

    fn bitand(self, rhs: LogFlags) -> LogFlags {
        LogFlags(self.0 & rhs.0)
    }
}

impl fmt::Debug for LogFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(LogFlags, &str); 7] = [
            (LogFlags::DATE, "DATE"),
            (LogFlags::TIME, "TIME"),
            (LogFlags::MICROSECONDS, "MICROSECONDS"),
            (LogFlags::LONG_FILE, "LONG_FILE"),
            (LogFlags::SHORT_FILE, "SHORT_FILE"),
            (LogFlags::MODULE, "MODULE"),
            (LogFlags::LEVEL, "LEVEL"),
        ];

        if self.is_empty() {
            return write!(f, "LogFlags(empty)");
        }
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "LogFlags({})", names.join(" | "))
    }
}
