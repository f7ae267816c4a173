//! Daily log file rotation
//!
//! Log files are named `<basename>.<YYYY-MM-DD>.log` inside a log
//! directory. Before each record the logger asks the policy whether the
//! calendar has moved on since the current file was opened and, if so,
//! opens the file for the new day.

use super::file::FileSink;
use crate::core::{LoggerError, Result};
use chrono::{Datelike, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of every log file.
pub const LOG_SUFFIX: &str = ".log";

/// Date format used in file names.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Where daily files live and how they are named.
///
/// # Examples
///
/// ```
/// use rust_daily_logger::sinks::RotationPolicy;
/// use chrono::NaiveDate;
///
/// let policy = RotationPolicy::new("/var/log/app", "server").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(policy.file_name(date), "server.2024-03-05.log");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    directory: PathBuf,
    basename: String,
}

impl RotationPolicy {
    /// Create a policy for `directory` and `basename`.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] if either is empty;
    /// a logger without both does not rotate.
    pub fn new(directory: impl Into<PathBuf>, basename: impl Into<String>) -> Result<Self> {
        let directory = directory.into();
        let basename = basename.into();

        if directory.as_os_str().is_empty() {
            return Err(LoggerError::config("RotationPolicy", "log directory is empty"));
        }
        if basename.is_empty() {
            return Err(LoggerError::config("RotationPolicy", "log file basename is empty"));
        }

        Ok(Self {
            directory,
            basename,
        })
    }

    /// Whether a file opened on `created` must be replaced at `now`.
    ///
    /// Year, month and day are compared one by one, each on its own, and
    /// any component that grew triggers rotation. Every forward date change
    /// is caught; a clock stepping backwards can also trigger.
    pub fn should_rotate<C: Datelike, N: Datelike>(created: &C, now: &N) -> bool {
        now.year() > created.year() || now.month() > created.month() || now.day() > created.day()
    }

    #[must_use]
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!(
            "{}.{}{}",
            self.basename,
            date.format(FILE_DATE_FORMAT),
            LOG_SUFFIX
        )
    }

    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.directory.join(self.file_name(date))
    }

    /// Open (or reopen for appending) the file for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be opened.
    pub fn open(&self, date: NaiveDate) -> Result<FileSink> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", self.directory.display()),
                e,
            )
        })?;
        FileSink::open(self.path_for(date))
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
