//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records from many threads never interleave when the mutex is enabled
//! - Counters stay exact under contention with either lock strategy
//! - Rotation while other threads write loses no records

use chrono::{DateTime, Local, TimeZone};
use rust_daily_logger::prelude::*;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("unambiguous local time")
}

/// A message long enough that unsynchronised writes would visibly tear.
fn message(thread: usize, seq: usize) -> String {
    format!("t{:02} n{:04} {}", thread, seq, "x".repeat(512))
}

fn run_writers(logger: &Arc<Logger>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let level = if i % 2 == 0 { LogLevel::Info } else { LogLevel::Warn };
                    logger.output(level, &message(t, i)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

fn assert_well_formed(lines: &[&str]) {
    for line in lines {
        let (label, body) = line.split_at(7);
        assert!(label == "[INFO ]" || label == "[WARN ]", "torn record: {}", line);
        assert_eq!(body.len(), "t00 n0000 ".len() + 512, "torn record: {}", line);
        assert!(body.ends_with(&"x".repeat(512)), "torn record: {}", line);
    }
}

/// Test that the mutex keeps every record on its own line
#[test]
fn test_mutex_keeps_records_whole() {
    let sink = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .flags(LogFlags::LEVEL)
            .lock_strategy(LockStrategy::Mutex)
            .sink(sink.clone())
            .build()
            .unwrap(),
    );

    run_writers(&logger);

    let contents = sink.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert_well_formed(&lines);

    // each thread's records keep their order
    for t in 0..THREADS {
        let tag = format!("t{:02} ", t);
        let seqs: Vec<usize> = lines
            .iter()
            .filter(|l| l[7..].starts_with(&tag))
            .map(|l| l[12..16].parse().unwrap())
            .collect();
        assert_eq!(seqs, (0..PER_THREAD).collect::<Vec<_>>());
    }
}

/// Test that counters are exact with either lock strategy
#[test]
fn test_counters_exact_under_contention() {
    for strategy in [LockStrategy::Mutex, LockStrategy::Disabled] {
        let logger = Arc::new(
            Logger::builder()
                .flags(LogFlags::empty())
                .lock_strategy(strategy)
                .sink(MemorySink::new())
                .build()
                .unwrap(),
        );

        run_writers(&logger);

        let stats = logger.stat();
        let half = (THREADS * PER_THREAD / 2) as u64;
        assert_eq!(stats[LogLevel::Info], half, "{:?}", strategy);
        assert_eq!(stats[LogLevel::Warn], half, "{:?}", strategy);
        assert_eq!(stats.total(), (THREADS * PER_THREAD) as u64, "{:?}", strategy);
    }
}

/// Test that concurrent file writes land whole in the daily file
#[test]
fn test_concurrent_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = Arc::new(
        Logger::builder()
            .daily_file(temp_dir.path(), "stress")
            .flags(LogFlags::LEVEL)
            .lock_strategy(LockStrategy::Mutex)
            .build()
            .unwrap(),
    );

    run_writers(&logger);
    logger.flush().unwrap();

    let path = logger.current_file().unwrap();
    let contents = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert_well_formed(&lines);
}

/// Test that a date change during concurrent writes loses no records
#[test]
fn test_rotation_under_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(ManualClock::new(local(2024, 6, 1, 12)));
    let logger = Arc::new(
        Logger::builder()
            .daily_file(temp_dir.path(), "stress")
            .flags(LogFlags::LEVEL)
            .lock_strategy(LockStrategy::Mutex)
            .clock(clock.clone())
            .build()
            .unwrap(),
    );

    let writers = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || run_writers(&logger))
    };
    thread::sleep(std::time::Duration::from_millis(5));
    clock.set(local(2024, 6, 2, 12));
    writers.join().unwrap();

    // rotates even if every writer finished before the date change
    logger.output(LogLevel::Warn, &message(99, 0)).unwrap();

    let mut total = 0;
    for day in ["2024-06-01", "2024-06-02"] {
        let path = temp_dir.path().join(format!("stress.{}.log", day));
        let contents = fs::read_to_string(path).unwrap_or_default();
        let lines: Vec<&str> = contents.lines().collect();
        assert_well_formed(&lines);
        total += lines.len();
    }
    assert_eq!(total, THREADS * PER_THREAD + 1);
    assert_eq!(
        logger.current_file(),
        Some(temp_dir.path().join("stress.2024-06-02.log"))
    );
}
