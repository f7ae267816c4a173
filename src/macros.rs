//! Logging macros for formatted messages.
//!
//! Each macro hands `format_args!` to the matching [`crate::Logger`]
//! method, so nothing is formatted when the level is filtered out, and the
//! caller location recorded is the macro call site.
//!
//! # Examples
//!
//! ```
//! use rust_daily_logger::prelude::*;
//! use rust_daily_logger::info;
//!
//! let logger = Logger::with_sink(MemorySink::new());
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// PANIC and FATAL records written this way do not escalate; use
/// [`log_panic!`] and [`fatal!`] for that.
///
/// ```
/// # use rust_daily_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use rust_daily_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use rust_daily_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use rust_daily_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_daily_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use rust_daily_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

/// Log a panic-level message, then panic with it.
///
/// ```should_panic
/// # use rust_daily_logger::prelude::*;
/// # let logger = Logger::with_sink(MemorySink::new());
/// use rust_daily_logger::log_panic;
/// log_panic!(logger, "invariant broken: {}", "queue empty");
/// ```
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic(::std::format_args!($($arg)+))
    };
}

/// Log a fatal-level message, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
}
