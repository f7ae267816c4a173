//! Record header rendering
//!
//! Produces lines of the form
//!
//! ```text
//! <prefix><YYYY/MM/DD> <HH:MM:SS>[.µµµµµµ] [LEVEL][module] file:line: message
//! ```
//!
//! with each field switched on or off by [`LogFlags`].

use super::caller::CallerLocation;
use super::flags::LogFlags;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Marker preceding the module directory in a caller path.
const MODULE_MARKER: &str = "/src/";

/// Tag used when no module can be derived from the caller path.
pub const UNKNOWN_MODULE: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy)]
pub struct HeaderFormatter<'a> {
    pub prefix: &'a str,
    pub flags: LogFlags,
    pub colors: bool,
}

impl<'a> HeaderFormatter<'a> {
    pub fn new(prefix: &'a str, flags: LogFlags) -> Self {
        Self {
            prefix,
            flags,
            colors: false,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Append the header for a record to `buf`.
    ///
    /// `location` is `None` when caller locations are disabled; the module
    /// and file segments are then left out whatever the flags say.
    pub fn format_header<Tz: TimeZone>(
        &self,
        buf: &mut Vec<u8>,
        time: &DateTime<Tz>,
        location: Option<&CallerLocation>,
        level: LogLevel,
    ) {
        let flags = self.flags;

        if !self.prefix.is_empty() {
            buf.extend_from_slice(self.prefix.as_bytes());
        }

        if flags.contains(LogFlags::DATE) {
            push_int(buf, time.year().max(0) as u32, 4);
            buf.push(b'/');
            push_int(buf, time.month(), 2);
            buf.push(b'/');
            push_int(buf, time.day(), 2);
            buf.push(b' ');
        }

        if flags.intersects(LogFlags::TIME | LogFlags::MICROSECONDS) {
            push_int(buf, time.hour(), 2);
            buf.push(b':');
            push_int(buf, time.minute(), 2);
            buf.push(b':');
            push_int(buf, time.second(), 2);
            if flags.contains(LogFlags::MICROSECONDS) {
                buf.push(b'.');
                // leap seconds report nanoseconds past 1e9
                push_int(buf, (time.nanosecond() / 1_000).min(999_999), 6);
            }
            buf.push(b' ');
        }

        if flags.contains(LogFlags::LEVEL) {
            self.push_level(buf, level);
        }

        let Some(location) = location else {
            return;
        };

        if flags.contains(LogFlags::MODULE) {
            buf.push(b'[');
            buf.extend_from_slice(module_of(&location.file).as_bytes());
            buf.extend_from_slice(b"] ");
        }

        if flags.intersects(LogFlags::SHORT_FILE | LogFlags::LONG_FILE) {
            let file = if flags.contains(LogFlags::SHORT_FILE) {
                short_file(&location.file)
            } else {
                &location.file
            };
            buf.extend_from_slice(file.as_bytes());
            if location.line > 0 {
                buf.push(b':');
                push_int(buf, location.line, 0);
            }
            buf.extend_from_slice(b": ");
        }
    }

    /// Append a complete record: header, message and a trailing newline
    /// unless the message already ends with one.
    pub fn format_record(&self, buf: &mut Vec<u8>, record: &LogRecord<'_>) {
        self.format_header(buf, &record.timestamp, record.location.as_ref(), record.level);
        buf.extend_from_slice(record.message.as_bytes());
        if !record.message.ends_with('\n') {
            buf.push(b'\n');
        }
    }

    #[cfg(feature = "console")]
    fn push_level(&self, buf: &mut Vec<u8>, level: LogLevel) {
        use colored::Colorize;

        if self.colors {
            let painted = level.label().color(level.color_code()).to_string();
            buf.extend_from_slice(painted.as_bytes());
        } else {
            buf.extend_from_slice(level.label().as_bytes());
        }
    }

    #[cfg(not(feature = "console"))]
    fn push_level(&self, buf: &mut Vec<u8>, level: LogLevel) {
        buf.extend_from_slice(level.label().as_bytes());
    }
}

/// Append `value` in decimal, zero-padded to at least `width` digits.
///
/// A width of 0 means no minimum.
pub fn push_int(buf: &mut Vec<u8>, mut value: u32, width: usize) {
    let mut digits = [0u8; 10];
    let mut pos = digits.len();

    loop {
        pos -= 1;
        digits[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }

    let len = digits.len() - pos;
    buf.extend(std::iter::repeat(b'0').take(width.saturating_sub(len)));
    buf.extend_from_slice(&digits[pos..]);
}

/// Module tag for a caller path: the directories between the last `/src/`
/// and the file name, or [`UNKNOWN_MODULE`].
///
/// ```
/// use rust_daily_logger::core::header::module_of;
///
/// assert_eq!(module_of("/home/u/src/pkgname/file.go"), "pkgname");
/// assert_eq!(module_of("/home/u/pkgname/file.go"), "UNKNOWN");
/// ```
pub fn module_of(file: &str) -> &str {
    if let Some(slash) = file.rfind('/') {
        let dir = &file[..slash];
        if let Some(marker) = dir.rfind(MODULE_MARKER) {
            return &file[marker + MODULE_MARKER.len()..slash];
        }
    }
    UNKNOWN_MODULE
}

/// Everything after the last `/`. A leading `/` alone does not count.
pub fn short_file(file: &str) -> &str {
    match file.rfind('/') {
        Some(pos) if pos > 0 => &file[pos + 1..],
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn render(flags: LogFlags, location: Option<&CallerLocation>, level: LogLevel) -> String {
        let time = Utc.with_ymd_and_hms(2024, 3, 5, 8, 9, 10).unwrap() + Duration::microseconds(1234);
        let mut buf = Vec::new();
        HeaderFormatter::new("", flags).format_header(&mut buf, &time, location, level);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_push_int_padding() {
        let mut buf = Vec::new();
        push_int(&mut buf, 7, 2);
        buf.push(b'|');
        push_int(&mut buf, 2024, 4);
        buf.push(b'|');
        push_int(&mut buf, 0, 0);
        buf.push(b'|');
        push_int(&mut buf, 42, 0);
        buf.push(b'|');
        push_int(&mut buf, 123, 6);
        buf.push(b'|');
        push_int(&mut buf, u32::MAX, 2);
        assert_eq!(String::from_utf8(buf).unwrap(), "07|2024|0|42|000123|4294967295");
    }

    #[test]
    fn test_date_time_level_short_file() {
        let location = CallerLocation::new("/a/b/c.go", 42);
        let flags = LogFlags::DATE | LogFlags::TIME | LogFlags::LEVEL | LogFlags::SHORT_FILE;
        assert_eq!(
            render(flags, Some(&location), LogLevel::Info),
            "2024/03/05 08:09:10 [INFO ]c.go:42: "
        );
    }

    #[test]
    fn test_microseconds_imply_time() {
        assert_eq!(
            render(LogFlags::MICROSECONDS, None, LogLevel::Debug),
            "08:09:10.001234 "
        );
    }

    #[test]
    fn test_long_file_and_module() {
        let location = CallerLocation::new("/home/u/src/net/conn.rs", 9);
        let flags = LogFlags::LEVEL | LogFlags::MODULE | LogFlags::LONG_FILE;
        assert_eq!(
            render(flags, Some(&location), LogLevel::Warn),
            "[WARN ][net] /home/u/src/net/conn.rs:9: "
        );
    }

    #[test]
    fn test_line_zero_is_omitted() {
        let location = CallerLocation::new("main.rs", 0);
        assert_eq!(render(LogFlags::SHORT_FILE, Some(&location), LogLevel::Info), "main.rs: ");
    }

    #[test]
    fn test_location_segments_need_a_location() {
        let flags = LogFlags::LEVEL | LogFlags::MODULE | LogFlags::SHORT_FILE;
        assert_eq!(render(flags, None, LogLevel::Error), "[ERROR]");
    }

    #[test]
    fn test_prefix_comes_first() {
        let time = Utc.with_ymd_and_hms(2024, 3, 5, 8, 9, 10).unwrap();
        let mut buf = Vec::new();
        HeaderFormatter::new("app: ", LogFlags::DATE).format_header(&mut buf, &time, None, LogLevel::Info);
        assert_eq!(buf, b"app: 2024/03/05 ");
    }

    #[test]
    fn test_record_newline_handling() {
        let time = chrono::Local::now();
        let formatter = HeaderFormatter::new("", LogFlags::empty());

        let mut buf = Vec::new();
        formatter.format_record(&mut buf, &LogRecord::new(LogLevel::Info, "hello", time));
        assert_eq!(buf, b"hello\n");

        buf.clear();
        formatter.format_record(&mut buf, &LogRecord::new(LogLevel::Info, "hello\n", time));
        assert_eq!(buf, b"hello\n");
    }

    #[test]
    fn test_module_of() {
        assert_eq!(module_of("/home/u/src/pkgname/file.go"), "pkgname");
        assert_eq!(module_of("/home/u/src/a/b/file.go"), "a/b");
        assert_eq!(module_of("/src/src/inner/file.rs"), "inner");
        assert_eq!(module_of("/home/u/pkgname/file.go"), UNKNOWN_MODULE);
        assert_eq!(module_of("file.go"), UNKNOWN_MODULE);
        assert_eq!(module_of("src/main.rs"), UNKNOWN_MODULE);
    }

    #[test]
    fn test_short_file() {
        assert_eq!(short_file("/a/b/c.go"), "c.go");
        assert_eq!(short_file("c.go"), "c.go");
        assert_eq!(short_file("/c.go"), "/c.go");
        assert_eq!(short_file("src/"), "");
    }
}
