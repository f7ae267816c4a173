//! File logging example
//!
//! Demonstrates the process-wide default logger writing to a daily file,
//! with every record echoed to the console.
//!
//! Run with: cargo run --example file_logging

use rust_daily_logger::facade;
use rust_daily_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Daily Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("rust_daily_logger_demo");

    // Daily file `application.<YYYY-MM-DD>.log`, console echo, mutex on
    let logger = facade::init(&log_dir, "application", LogLevel::Debug, true, true, true)?;

    println!("1. Logging to both console and file:");
    facade::info("Application started");
    facade::debug("Loading configuration...");
    facade::info("Configuration loaded successfully");
    facade::warn("Using default settings for some options");
    facade::error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        facade::info(format_args!("Processing item {}/5", i));
        if i == 3 {
            facade::warn_ln(&[&"Item", &i, &"took longer than expected"]);
        }
    }

    facade::print("All operations completed")?;

    // Flush to ensure all records are on disk
    facade::flush()?;

    if let Some(stats) = facade::stat() {
        println!("\n{} records written", stats.total());
    }

    println!("\n=== Example completed successfully! ===");
    if let Some(path) = logger.current_file() {
        println!("Check '{}' for the full log output", path.display());
    }

    Ok(())
}
