//! Log record structure

use super::caller::CallerLocation;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::fmt;

/// One log call, alive only while it is being rendered.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub timestamp: DateTime<Local>,
    pub location: Option<CallerLocation>,
    pub level: LogLevel,
    pub message: &'a str,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: LogLevel, message: &'a str, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            location: None,
            level,
            message,
        }
    }

    pub fn with_location(mut self, location: Option<CallerLocation>) -> Self {
        self.location = location;
        self
    }
}

/// Displays its parts separated by single spaces.
///
/// Backs the `*_ln` logging variants, which take a list of values instead
/// of a format string.
///
/// ```
/// use rust_daily_logger::core::Joined;
///
/// let port = 8080;
/// assert_eq!(Joined(&[&"listening on", &port]).to_string(), "listening on 8080");
/// ```
pub struct Joined<'a>(pub &'a [&'a dyn fmt::Display]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}
