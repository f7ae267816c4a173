//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Permission bits for newly created log files, before the umask.
#[cfg(unix)]
const LOG_FILE_MODE: u32 = 0o666;

/// An unbuffered, append-only log file.
///
/// Each record goes to the file in a single `write_all`, so nothing is held
/// in user space between records.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for reading and appending, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::FileOpen`] if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut options = OpenOptions::new();
        options.read(true).append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(LOG_FILE_MODE);
        }

        let file = options
            .open(&path)
            .map_err(|e| LoggerError::file_open(path.display().to_string(), e))?;

        Ok(Self { file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        (&self.file).write_all(record)
    }

    fn flush(&self) -> io::Result<()> {
        (&self.file).flush()
    }

    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("file")
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        // surfaces deferred write errors that a plain drop would swallow
        self.file.sync_all()
    }
}
