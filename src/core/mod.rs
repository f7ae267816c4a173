//! Core logger types and traits

pub mod caller;
pub mod clock;
pub mod config;
pub mod error;
pub mod flags;
pub mod header;
pub mod lock;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod sink;
pub mod stats;

pub use caller::{CallerLocation, CallerProvider, FixedCaller, NoCaller, TrackedCaller};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use flags::LogFlags;
pub use header::HeaderFormatter;
pub use lock::{LockStrategy, MutexWrap};
pub use log_level::{LogLevel, LEVEL_COUNT};
pub use log_record::{Joined, LogRecord};
pub use logger::{Logger, LoggerBuilder, FATAL_EXIT_CODE, STACK_BUFFER_SIZE};
pub use sink::Sink;
pub use stats::{LevelCounters, LevelStats};
