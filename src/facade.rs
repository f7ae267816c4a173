//! Process-wide default loggers
//!
//! Two loggers live here: the console logger, which always exists and
//! writes to stdout, and the default logger installed by [`init`]. The free
//! functions forward to the default logger and, if it was initialised with
//! console echo, to the console logger too.
//!
//! Applications that prefer explicit ownership can ignore this module and
//! pass [`Logger`] values around instead.
//!
//! # Example
//!
//! ```no_run
//! use rust_daily_logger::{facade, LogLevel};
//!
//! facade::init("/var/log/app", "server", LogLevel::Info, true, true, true)?;
//! facade::info("server started");
//! facade::warn(format_args!("{} connections queued", 12));
//! # Ok::<(), rust_daily_logger::LoggerError>(())
//! ```

use crate::core::{
    logger::stack_message, Joined, LevelStats, LockStrategy, LogLevel, Logger, LoggerConfig,
    LoggerError, Result,
};
use parking_lot::RwLock;
use std::fmt;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

static CONSOLE: LazyLock<Logger> = LazyLock::new(Logger::console);

static DEFAULT: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);

/// The process console logger.
pub fn console() -> &'static Logger {
    &CONSOLE
}

/// The logger installed by [`init`], if any.
pub fn logger() -> Option<Arc<Logger>> {
    DEFAULT.read().clone()
}

/// Install the default logger: a daily file in `directory` named after
/// `basename`, starting with today's file.
///
/// Calling it again replaces the default. The previous logger closes its
/// file once the last `Arc` handed out by [`logger`] is gone.
///
/// # Errors
///
/// Returns an error, after reporting it on the console logger, if the
/// settings are invalid or the file cannot be opened. The previous default
/// stays installed in that case.
pub fn init(
    directory: impl Into<PathBuf>,
    basename: impl Into<String>,
    min_level: LogLevel,
    echo_to_console: bool,
    show_caller_location: bool,
    enable_mutex: bool,
) -> Result<Arc<Logger>> {
    let config = LoggerConfig {
        log_directory: directory.into(),
        log_file_basename: basename.into(),
        minimum_level: min_level,
        echo_to_console,
        show_caller_location,
        enable_mutex,
        ..LoggerConfig::default()
    };
    init_with_config(&config)
}

/// [`init`] driven by a [`LoggerConfig`].
pub fn init_with_config(config: &LoggerConfig) -> Result<Arc<Logger>> {
    match Logger::from_config(config) {
        Ok(logger) => Ok(install(logger)),
        Err(e) => {
            console().error(&e);
            Err(e)
        }
    }
}

/// Install an already built logger as the default.
pub fn install(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    let previous = DEFAULT.write().replace(Arc::clone(&logger));
    drop(previous);
    logger
}

/// Remove the default logger, returning it.
pub fn uninstall() -> Option<Arc<Logger>> {
    DEFAULT.write().take()
}

fn echo_target(logger: &Logger) -> Option<&'static Logger> {
    logger.is_console_echo().then(console)
}

/// Send one record to the default logger and its console echo.
fn forward(level: LogLevel, message: &dyn fmt::Display, site: &'static Location<'static>) {
    let Some(logger) = logger() else {
        return;
    };

    let echo = echo_target(&logger);
    if !logger.enabled(level) && !echo.is_some_and(|c| c.enabled(level)) {
        return;
    }

    let text = message.to_string();
    let _ = logger.write_at(level, &text, site);
    if let Some(console) = echo {
        let _ = console.write_at(level, &text, site);
    }
}

/// Like [`forward`], with the DEBUG/INFO pre-filter applied per logger.
fn forward_filtered(level: LogLevel, message: &dyn fmt::Display, site: &'static Location<'static>) {
    let Some(logger) = logger() else {
        return;
    };

    let echo = echo_target(&logger);
    let to_default = level >= logger.level();
    let to_console = echo.filter(|c| level >= c.level());
    if !to_default && to_console.is_none() {
        return;
    }

    let text = message.to_string();
    if to_default {
        let _ = logger.write_at(level, &text, site);
    }
    if let Some(console) = to_console {
        let _ = console.write_at(level, &text, site);
    }
}

#[track_caller]
pub fn debug(message: impl fmt::Display) {
    forward_filtered(LogLevel::Debug, &message, Location::caller());
}

#[track_caller]
pub fn debug_ln(parts: &[&dyn fmt::Display]) {
    forward_filtered(LogLevel::Debug, &Joined(parts), Location::caller());
}

#[track_caller]
pub fn info(message: impl fmt::Display) {
    forward_filtered(LogLevel::Info, &message, Location::caller());
}

#[track_caller]
pub fn info_ln(parts: &[&dyn fmt::Display]) {
    forward_filtered(LogLevel::Info, &Joined(parts), Location::caller());
}

#[track_caller]
pub fn warn(message: impl fmt::Display) {
    forward(LogLevel::Warn, &message, Location::caller());
}

#[track_caller]
pub fn warn_ln(parts: &[&dyn fmt::Display]) {
    forward(LogLevel::Warn, &Joined(parts), Location::caller());
}

#[track_caller]
pub fn error(message: impl fmt::Display) {
    forward(LogLevel::Error, &message, Location::caller());
}

#[track_caller]
pub fn error_ln(parts: &[&dyn fmt::Display]) {
    forward(LogLevel::Error, &Joined(parts), Location::caller());
}

/// INFO record through the default logger, without the wrapper filter.
///
/// # Errors
///
/// Returns [`LoggerError::NotInitialized`] if [`init`] has not been called,
/// or the default logger's write error.
#[track_caller]
pub fn print(message: impl fmt::Display) -> Result<()> {
    print_at(&message, Location::caller())
}

#[track_caller]
pub fn print_ln(parts: &[&dyn fmt::Display]) -> Result<()> {
    print_at(&Joined(parts), Location::caller())
}

fn print_at(message: &dyn fmt::Display, site: &'static Location<'static>) -> Result<()> {
    let logger = logger().ok_or(LoggerError::NotInitialized)?;
    let text = message.to_string();
    let result = logger.write_at(LogLevel::Info, &text, site);
    if let Some(console) = echo_target(&logger) {
        let _ = console.write_at(LogLevel::Info, &text, site);
    }
    result
}

/// Write a PANIC record to the default logger (and echo), then panic.
/// Panics even when no default logger is installed.
#[track_caller]
pub fn panic(message: impl fmt::Display) -> ! {
    let message = message.to_string();
    forward(LogLevel::Panic, &message, Location::caller());
    std::panic::panic_any(message)
}

#[track_caller]
pub fn panic_ln(parts: &[&dyn fmt::Display]) -> ! {
    let message = Joined(parts).to_string();
    forward(LogLevel::Panic, &message, Location::caller());
    std::panic::panic_any(message)
}

/// Write a FATAL record to the default logger (and echo), then exit with
/// status 1. Exits even when no default logger is installed.
#[track_caller]
pub fn fatal(message: impl fmt::Display) -> ! {
    forward(LogLevel::Fatal, &message, Location::caller());
    terminate()
}

#[track_caller]
pub fn fatal_ln(parts: &[&dyn fmt::Display]) -> ! {
    forward(LogLevel::Fatal, &Joined(parts), Location::caller());
    terminate()
}

fn terminate() -> ! {
    if let Some(logger) = logger() {
        let _ = logger.flush();
    }
    console().terminate()
}

/// ERROR record with a stack trace of the calling thread.
#[track_caller]
pub fn stack(message: impl fmt::Display) {
    if logger().is_none() {
        return;
    }
    let text = stack_message(&message);
    forward(LogLevel::Error, &text, Location::caller());
}

/// Counters of the default logger.
pub fn stat() -> Option<LevelStats> {
    logger().map(|logger| logger.stat())
}

pub fn set_level(level: LogLevel) {
    if let Some(logger) = logger() {
        logger.set_level(level);
    }
}

/// Lock strategy of the default logger.
pub fn lock_strategy() -> Option<LockStrategy> {
    logger().map(|logger| logger.lock_strategy())
}

pub fn flush() -> Result<()> {
    if let Some(logger) = logger() {
        logger.flush()?;
    }
    console().flush()
}
