//! Main logger implementation

use super::{
    caller::{CallerProvider, TrackedCaller},
    clock::{Clock, SystemClock},
    config::LoggerConfig,
    error::{LoggerError, Result},
    flags::LogFlags,
    header::HeaderFormatter,
    lock::{LockStrategy, MutexWrap},
    log_level::LogLevel,
    log_record::{Joined, LogRecord},
    sink::Sink,
    stats::{LevelCounters, LevelStats},
};
use crate::sinks::{ConsoleSink, RotationPolicy};
use chrono::{DateTime, Local};
use parking_lot::{Mutex, RwLock};
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Upper bound on the stack trace appended by [`Logger::stack`] (1 MiB).
pub const STACK_BUFFER_SIZE: usize = 1 << 20;

/// Formatting buffers larger than this are released after use.
const RETAINED_BUFFER_CAPACITY: usize = 64 * 1024;

/// Exit status of the `fatal` family.
pub const FATAL_EXIT_CODE: i32 = 1;

// Each thread reuses one formatting buffer, reset per record.
thread_local! {
    static RECORD_BUFFER: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

fn with_record_buffer<R>(f: impl FnOnce(&mut Vec<u8>) -> R) -> R {
    RECORD_BUFFER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            buf.clear();
            let result = f(&mut *buf);
            if buf.capacity() > RETAINED_BUFFER_CAPACITY {
                *buf = Vec::new();
            }
            result
        }
        // re-entered from inside a sink
        Err(_) => f(&mut Vec::new()),
    })
}

/// A leveled logger writing to one sink, optionally rotated daily.
///
/// Loggers are shared by reference (usually in an `Arc`); every method
/// takes `&self`. Whether concurrent records are serialised depends on the
/// [`LockStrategy`] chosen at construction.
///
/// # Example
///
/// ```
/// use rust_daily_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .flags(LogFlags::LEVEL)
///     .sink(sink.clone())
///     .build()
///     .unwrap();
///
/// logger.info("service started");
/// assert_eq!(sink.contents(), "[INFO ]service started\n");
/// ```
pub struct Logger {
    prefix: RwLock<String>,
    flags: AtomicU32,
    min_level: RwLock<LogLevel>,
    sink: RwLock<Box<dyn Sink>>,
    rotation: Option<RotationPolicy>,
    /// When the current file was opened
    created: Mutex<DateTime<Local>>,
    counters: LevelCounters,
    mu: MutexWrap,
    echo_to_console: bool,
    show_caller_location: bool,
    colors: bool,
    caller: Box<dyn CallerProvider>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// A console logger: stdout, every level, default flags, caller
    /// locations on, no rotation, no write lock.
    #[must_use]
    pub fn console() -> Self {
        Self::with_sink(ConsoleSink::stdout())
    }

    /// A logger with default settings writing to `sink`.
    #[must_use]
    pub fn with_sink(sink: impl Sink + 'static) -> Self {
        LoggerBuilder::new().assemble(Box::new(sink), None, SystemClock.now())
    }

    /// Build a daily-rotated file logger from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or today's file
    /// cannot be opened.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;
        Logger::builder()
            .daily_file(&config.log_directory, &config.log_file_basename)
            .min_level(config.minimum_level)
            .console_echo(config.echo_to_console)
            .show_caller_location(config.show_caller_location)
            .lock_strategy(LockStrategy::from(config.enable_mutex))
            .prefix(config.prefix.clone())
            .flags(config.flags)
            .build()
    }

    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn flags(&self) -> LogFlags {
        LogFlags::from_bits_truncate(self.flags.load(Ordering::Relaxed))
    }

    pub fn set_flags(&self, flags: LogFlags) {
        self.flags.store(flags.bits(), Ordering::Relaxed);
    }

    pub fn prefix(&self) -> String {
        self.prefix.read().clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        *self.prefix.write() = prefix.into();
    }

    /// Whether records should also be echoed to the console logger.
    /// Consulted by the process-wide facade.
    pub fn is_console_echo(&self) -> bool {
        self.echo_to_console
    }

    pub fn shows_caller_location(&self) -> bool {
        self.show_caller_location
    }

    pub fn lock_strategy(&self) -> LockStrategy {
        self.mu.strategy()
    }

    /// When the current sink was opened (or the logger built).
    pub fn created_at(&self) -> DateTime<Local> {
        *self.created.lock()
    }

    /// Path of the file currently written, for rotated loggers
    pub fn current_file(&self) -> Option<PathBuf> {
        let policy = self.rotation.as_ref()?;
        Some(policy.path_for(self.created_at().date_naive()))
    }

    pub fn log_directory(&self) -> Option<&Path> {
        self.rotation.as_ref().map(RotationPolicy::directory)
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.is_severe() || level >= self.level()
    }

    /// Write one record.
    ///
    /// Records below the minimum level are dropped, except ERROR, PANIC
    /// and FATAL, which always pass. The caller location reported is that
    /// of the code calling this method.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::SinkWrite`] if the sink rejects the record.
    #[track_caller]
    pub fn output(&self, level: LogLevel, message: &str) -> Result<()> {
        self.write_at(level, message, Location::caller())
    }

    pub(crate) fn write_at(
        &self,
        level: LogLevel,
        message: &str,
        site: &'static Location<'static>,
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let mut guard = self.mu.lock();
        self.check_file();
        let now = self.clock.now();
        let flags = self.flags();

        let location = if self.show_caller_location && flags.wants_location() {
            // resolving the caller can be slow; do it unlocked
            drop(guard.take());
            let location = self.caller.locate(site);
            guard = self.mu.lock();
            location
        } else {
            None
        };

        self.counters.record(level);
        let record = LogRecord::new(level, message, now).with_location(location);

        let prefix = self.prefix.read();
        let formatter = HeaderFormatter::new(prefix.as_str(), flags).with_colors(self.colors);
        let result = with_record_buffer(|buf| {
            formatter.format_record(buf, &record);
            let sink = self.sink.read();
            sink.write_record(buf)
                .map_err(|e| LoggerError::sink_write(sink.name(), e))
        });

        drop(prefix);
        drop(guard);
        result
    }

    /// Replace the file sink when the date has moved on since it was opened.
    fn check_file(&self) {
        let Some(policy) = &self.rotation else {
            return;
        };

        let now = self.clock.now();
        let mut created = self.created.lock();
        if !RotationPolicy::should_rotate(&*created, &now) {
            return;
        }

        match policy.open(now.date_naive()) {
            Ok(file) => {
                let replacement: Box<dyn Sink> = Box::new(file);
                let previous = std::mem::replace(&mut *self.sink.write(), replacement);
                *created = now;
                drop(created);

                let previous_name = previous.name().to_string();
                if let Err(e) = previous.close() {
                    let err = LoggerError::file_rotation(
                        previous_name,
                        format!("Failed to close previous log file: {}", e),
                    );
                    crate::facade::console().error(err);
                }
            }
            Err(e) => {
                crate::facade::console().error(format_args!(
                    "Log rotation failed: {}. Continuing with current file.",
                    e
                ));
            }
        }
    }

    /// Write at `level` unless filtered. Unlike [`Logger::panic`] and
    /// [`Logger::fatal`], this never escalates.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }
        let _ = self.write_at(level, &message.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        if LogLevel::Debug < self.level() {
            return;
        }
        let _ = self.write_at(LogLevel::Debug, &message.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn debug_ln(&self, parts: &[&dyn fmt::Display]) {
        if LogLevel::Debug < self.level() {
            return;
        }
        let _ = self.write_at(LogLevel::Debug, &Joined(parts).to_string(), Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        if LogLevel::Info < self.level() {
            return;
        }
        let _ = self.write_at(LogLevel::Info, &message.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn info_ln(&self, parts: &[&dyn fmt::Display]) {
        if LogLevel::Info < self.level() {
            return;
        }
        let _ = self.write_at(LogLevel::Info, &Joined(parts).to_string(), Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        let _ = self.write_at(LogLevel::Warn, &message.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn warn_ln(&self, parts: &[&dyn fmt::Display]) {
        let _ = self.write_at(LogLevel::Warn, &Joined(parts).to_string(), Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        let _ = self.write_at(LogLevel::Error, &message.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn error_ln(&self, parts: &[&dyn fmt::Display]) {
        let _ = self.write_at(LogLevel::Error, &Joined(parts).to_string(), Location::caller());
    }

    /// Write an INFO record without the wrapper-level filter.
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        let _ = self.write_at(LogLevel::Info, &message.to_string(), Location::caller());
    }

    #[track_caller]
    pub fn print_ln(&self, parts: &[&dyn fmt::Display]) {
        let _ = self.write_at(LogLevel::Info, &Joined(parts).to_string(), Location::caller());
    }

    /// Write a PANIC record, then panic with the message as payload.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        let message = message.to_string();
        let _ = self.write_at(LogLevel::Panic, &message, Location::caller());
        std::panic::panic_any(message)
    }

    #[track_caller]
    pub fn panic_ln(&self, parts: &[&dyn fmt::Display]) -> ! {
        let message = Joined(parts).to_string();
        let _ = self.write_at(LogLevel::Panic, &message, Location::caller());
        std::panic::panic_any(message)
    }

    /// Write a FATAL record, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        let _ = self.write_at(LogLevel::Fatal, &message.to_string(), Location::caller());
        self.terminate()
    }

    #[track_caller]
    pub fn fatal_ln(&self, parts: &[&dyn fmt::Display]) -> ! {
        let _ = self.write_at(LogLevel::Fatal, &Joined(parts).to_string(), Location::caller());
        self.terminate()
    }

    pub(crate) fn terminate(&self) -> ! {
        let _ = self.flush();
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Write an ERROR record with `message` followed by a stack trace of
    /// the calling thread. The whole text is cut at [`STACK_BUFFER_SIZE`].
    #[track_caller]
    pub fn stack(&self, message: impl fmt::Display) {
        let text = stack_message(&message);
        let _ = self.write_at(LogLevel::Error, &text, Location::caller());
    }

    /// Copy of the per-level counters.
    pub fn stat(&self) -> LevelStats {
        let _guard = self.mu.lock();
        self.counters.snapshot()
    }

    pub fn flush(&self) -> Result<()> {
        let sink = self.sink.read();
        sink.flush()
            .map_err(|e| LoggerError::sink_write(sink.name(), e))
    }
}

/// `message`, a newline and the current thread's backtrace, at most
/// [`STACK_BUFFER_SIZE`] bytes in total.
pub(crate) fn stack_message(message: &dyn fmt::Display) -> String {
    let mut text = format!("{}\n{}", message, Backtrace::force_capture());
    truncate_at_char_boundary(&mut text, STACK_BUFFER_SIZE);
    text
}

fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

impl Default for Logger {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.sink.read().name())
            .field("min_level", &self.level())
            .field("flags", &self.flags())
            .field("rotation", &self.rotation)
            .field("lock", &self.lock_strategy())
            .field("echo_to_console", &self.echo_to_console)
            .field("show_caller_location", &self.show_caller_location)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use rust_daily_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .daily_file("/var/log/app", "server")
///     .min_level(LogLevel::Info)
///     .lock_strategy(LockStrategy::Mutex)
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    prefix: String,
    flags: LogFlags,
    min_level: LogLevel,
    sink: Option<Box<dyn Sink>>,
    daily_file: Option<(PathBuf, String)>,
    echo_to_console: bool,
    show_caller_location: bool,
    lock: LockStrategy,
    colors: bool,
    caller: Box<dyn CallerProvider>,
    clock: Arc<dyn Clock>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            flags: LogFlags::DEFAULT,
            min_level: LogLevel::Debug,
            sink: None,
            daily_file: None,
            echo_to_console: false,
            show_caller_location: true,
            lock: LockStrategy::Disabled,
            colors: false,
            caller: Box::new(TrackedCaller),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: LogFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Write to `sink`. Ignored when [`LoggerBuilder::daily_file`] is set.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Write to `<directory>/<basename>.<YYYY-MM-DD>.log`, moving to a new
    /// file when the date changes.
    #[must_use = "builder methods return a new value"]
    pub fn daily_file(mut self, directory: impl Into<PathBuf>, basename: impl Into<String>) -> Self {
        self.daily_file = Some((directory.into(), basename.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_echo(mut self, echo: bool) -> Self {
        self.echo_to_console = echo;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_caller_location(mut self, show: bool) -> Self {
        self.show_caller_location = show;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn lock_strategy(mut self, lock: LockStrategy) -> Self {
        self.lock = lock;
        self
    }

    /// Colour level labels (console sinks only make sense here)
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_provider<P: CallerProvider + 'static>(mut self, provider: P) -> Self {
        self.caller = Box::new(provider);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the Logger, opening today's file for daily loggers.
    ///
    /// # Errors
    ///
    /// Returns an error if the daily file settings are empty or the file
    /// cannot be opened.
    pub fn build(mut self) -> Result<Logger> {
        let now = self.clock.now();

        let (sink, rotation): (Box<dyn Sink>, Option<RotationPolicy>) =
            match self.daily_file.take() {
                Some((directory, basename)) => {
                    let policy = RotationPolicy::new(directory, basename)?;
                    let file = policy.open(now.date_naive())?;
                    (Box::new(file) as Box<dyn Sink>, Some(policy))
                }
                None => (
                    self.sink
                        .take()
                        .unwrap_or_else(|| Box::new(ConsoleSink::stdout()) as Box<dyn Sink>),
                    None,
                ),
            };

        Ok(self.assemble(sink, rotation, now))
    }

    fn assemble(
        self,
        sink: Box<dyn Sink>,
        rotation: Option<RotationPolicy>,
        created: DateTime<Local>,
    ) -> Logger {
        Logger {
            prefix: RwLock::new(self.prefix),
            flags: AtomicU32::new(self.flags.bits()),
            min_level: RwLock::new(self.min_level),
            sink: RwLock::new(sink),
            rotation,
            created: Mutex::new(created),
            counters: LevelCounters::new(),
            mu: MutexWrap::new(self.lock),
            echo_to_console: self.echo_to_console,
            show_caller_location: self.show_caller_location,
            colors: self.colors,
            caller: self.caller,
            clock: self.clock,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
