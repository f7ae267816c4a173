//! # Rust Daily Logger
//!
//! A leveled, synchronous logger that writes formatted records to the
//! console and to log files rotated daily.
//!
//! ## Features
//!
//! - **Fixed header format**: optional date, time, microseconds, level,
//!   module and caller file:line, selected by [`LogFlags`]
//! - **Daily files**: `<basename>.<YYYY-MM-DD>.log`, replaced when the date
//!   changes
//! - **Optional locking**: serialise writes with a mutex, or trade line
//!   atomicity for throughput
//! - **Process-wide facade**: a console logger plus a default file logger
//!   with console echo, see [`facade`]

pub mod core;
pub mod facade;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerLocation, CallerProvider, Clock, FixedCaller, LevelStats, LockStrategy, LogFlags,
        LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, ManualClock, NoCaller,
        Result, Sink, SystemClock, TrackedCaller,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink, RotationPolicy};
}

pub use crate::core::{
    CallerLocation, CallerProvider, Clock, FixedCaller, HeaderFormatter, LevelStats,
    LockStrategy, LogFlags, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, ManualClock, NoCaller, Result, Sink, SystemClock, TrackedCaller,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink, RotationPolicy};
