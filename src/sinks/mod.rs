//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod rotating_file;

pub use console::{ConsoleSink, ConsoleStream};
pub use file::FileSink;
pub use memory::MemorySink;
pub use rotating_file::RotationPolicy;

pub use crate::core::Sink;
