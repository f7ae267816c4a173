//! Logger configuration
//!
//! The settings a host process hands to [`crate::facade::init_with_config`]
//! or [`crate::Logger::from_config`]. Every field has a default, so a JSON
//! document only needs the ones it changes.

use super::error::{LoggerError, Result};
use super::flags::LogFlags;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Directory holding the daily files
    pub log_directory: PathBuf,
    /// File name stem; files are `<basename>.<YYYY-MM-DD>.log`
    pub log_file_basename: String,
    pub minimum_level: LogLevel,
    /// Also write every record to the console logger
    pub echo_to_console: bool,
    pub show_caller_location: bool,
    /// Serialise writes with a real mutex
    pub enable_mutex: bool,
    pub prefix: String,
    pub flags: LogFlags,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_directory: PathBuf::new(),
            log_file_basename: String::new(),
            minimum_level: LogLevel::Debug,
            echo_to_console: false,
            show_caller_location: true,
            enable_mutex: false,
            prefix: String::new(),
            flags: LogFlags::DEFAULT,
        }
    }
}

impl LoggerConfig {
    pub fn new(log_directory: impl Into<PathBuf>, log_file_basename: impl Into<String>) -> Self {
        Self {
            log_directory: log_directory.into(),
            log_file_basename: log_file_basename.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&text)
    }

    /// Check that the configuration describes a file logger.
    pub fn validate(&self) -> Result<()> {
        if self.log_directory.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "log_directory must not be empty"));
        }
        if self.log_file_basename.is_empty() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "log_file_basename must not be empty",
            ));
        }
        if self.log_file_basename.contains(['/', '\\']) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!(
                    "log_file_basename '{}' must not contain a path separator",
                    self.log_file_basename
                ),
            ));
        }
        Ok(())
    }
}
