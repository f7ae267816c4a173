//! Caller location resolution
//!
//! Public logging methods are `#[track_caller]`, so the compiler hands the
//! write path the location of the code that called them. A
//! [`CallerProvider`] decides what to do with that hint: report it as is,
//! substitute a fixed location, or report nothing.

use std::borrow::Cow;
use std::panic::Location;

/// File and line of the code that issued a log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl CallerLocation {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl From<&'static Location<'static>> for CallerLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
        }
    }
}

pub trait CallerProvider: Send + Sync {
    /// Resolve the caller for a record issued at `site`.
    ///
    /// `None` means the location is unknown; the header then omits the
    /// module and file segments.
    fn locate(&self, site: &'static Location<'static>) -> Option<CallerLocation>;
}

/// Reports the call site tracked by the compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackedCaller;

impl CallerProvider for TrackedCaller {
    fn locate(&self, site: &'static Location<'static>) -> Option<CallerLocation> {
        Some(CallerLocation::from(site))
    }
}

/// Always reports the same location. Useful in tests and for records
/// forwarded from another process.
#[derive(Debug, Clone)]
pub struct FixedCaller(pub CallerLocation);

impl FixedCaller {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self(CallerLocation::new(file, line))
    }
}

impl CallerProvider for FixedCaller {
    fn locate(&self, _site: &'static Location<'static>) -> Option<CallerLocation> {
        Some(self.0.clone())
    }
}

/// Sentinel provider for callers that do not want locations resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCaller;

impl CallerProvider for NoCaller {
    fn locate(&self, _site: &'static Location<'static>) -> Option<CallerLocation> {
        None
    }
}
