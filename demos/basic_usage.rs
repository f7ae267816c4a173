//! Basic logger usage example
//!
//! Demonstrates console logging, header flags and level filtering.
//!
//! Run with: cargo run --example basic_usage

use rust_daily_logger::prelude::*;
use rust_daily_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Daily Logger - Basic Usage Example ===\n");

    // Console logger with the default header: date, time, level, file:line
    let logger = Logger::console();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Logging with a higher minimum level:");
    logger.set_level(LogLevel::Warn);
    println!("   Minimum level set to WARN - debug and info won't show:");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");
    logger.output(LogLevel::Error, "Errors always pass the filter")?;

    println!("\n3. Custom header with prefix, microseconds and module:");
    let detailed = Logger::builder()
        .prefix("[demo] ")
        .flags(
            LogFlags::STD
                | LogFlags::MICROSECONDS
                | LogFlags::LEVEL
                | LogFlags::MODULE
                | LogFlags::SHORT_FILE,
        )
        .colors(true)
        .sink(ConsoleSink::stdout())
        .build()?;
    info!(detailed, "listening on port {}", 8080);
    warn!(detailed, "{} requests queued", 12);
    detailed.info_ln(&[&"joined", &"with", &"spaces", &3]);

    println!("\n4. Per-level counters:");
    let stats = detailed.stat();
    for level in LogLevel::ALL {
        println!("   {:<5} {}", level, stats[level]);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
