//! Sink trait for log output destinations

use std::io;

/// A destination for fully rendered records.
///
/// Writes take `&self`: a logger may share its sink between threads when it
/// runs without a write lock, so implementations must be safe to call
/// concurrently.
pub trait Sink: Send + Sync {
    /// Write one rendered record (header, message and newline).
    fn write_record(&self, record: &[u8]) -> io::Result<()>;

    fn flush(&self) -> io::Result<()>;

    fn name(&self) -> &str;

    /// Release the sink after it has been replaced. Only file sinks hold
    /// anything worth closing; the console is never closed.
    fn close(self: Box<Self>) -> io::Result<()> {
        self.flush()
    }
}
