//! Tests for behavior that ends the process or only shows on stdout
//!
//! Each test re-runs this test binary on itself with `CHILD_ENV` set. The
//! child does the work and the parent checks its exit status and output.
//! Console records bypass libtest's capture, so they show up in the
//! child's stdout.

use chrono::{DateTime, Local, TimeZone};
use rust_daily_logger::core::FATAL_EXIT_CODE;
use rust_daily_logger::facade;
use rust_daily_logger::prelude::*;
use std::env;
use std::fs;
use std::process::{Command, Output};
use std::sync::Arc;
use tempfile::TempDir;

const CHILD_ENV: &str = "RUST_DAILY_LOGGER_CHILD";
const DIR_ENV: &str = "RUST_DAILY_LOGGER_CHILD_DIR";

fn local(y: i32, m: u32, d: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
}

fn is_child(case: &str) -> bool {
    env::var(CHILD_ENV).map_or(false, |value| value == case)
}

fn run_child(test_name: &str, case: &str, dir: Option<&TempDir>) -> Output {
    let mut command = Command::new(env::current_exe().expect("test binary path"));
    command
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, case);
    if let Some(dir) = dir {
        command.env(DIR_ENV, dir.path());
    }
    command.output().expect("Failed to run child test")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn console_logger() -> Logger {
    Logger::builder()
        .flags(LogFlags::LEVEL)
        .sink(ConsoleSink::new())
        .build()
        .unwrap()
}

#[test]
fn test_fatal_exits_after_writing() {
    if is_child("fatal") {
        console_logger().fatal("dying");
    }

    let output = run_child("test_fatal_exits_after_writing", "fatal", None);
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(stdout(&output).contains("[FATAL]dying"), "{}", stdout(&output));
}

#[test]
fn test_fatal_ln_exits_after_writing() {
    if is_child("fatal_ln") {
        console_logger().fatal_ln(&[&"lost", &"quorum", &3]);
    }

    let output = run_child("test_fatal_ln_exits_after_writing", "fatal_ln", None);
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(
        stdout(&output).contains("[FATAL]lost quorum 3"),
        "{}",
        stdout(&output)
    );
}

#[test]
fn test_facade_fatal_flushes_default_file() {
    if is_child("facade_fatal") {
        let dir = env::var(DIR_ENV).unwrap();
        facade::init(dir, "fatal", LogLevel::Info, true, false, true).unwrap();
        facade::fatal("shutting down");
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_child(
        "test_facade_fatal_flushes_default_file",
        "facade_fatal",
        Some(&temp_dir),
    );
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    // echoed through the console logger
    assert!(stdout(&output).contains("[FATAL]"), "{}", stdout(&output));

    let files: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let text = fs::read_to_string(&files[0]).unwrap();
    assert!(text.ends_with("[FATAL]shutting down\n"), "{}", text);
}

#[test]
fn test_facade_fatal_exits_without_default() {
    if is_child("facade_fatal_uninit") {
        facade::uninstall();
        facade::fatal("nobody listening");
    }

    let output = run_child(
        "test_facade_fatal_exits_without_default",
        "facade_fatal_uninit",
        None,
    );
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
}

#[cfg(unix)]
#[test]
fn test_rotation_failure_reported_on_console() {
    if is_child("rotation_failure") {
        let dir = env::var(DIR_ENV).unwrap();
        let log_dir = std::path::Path::new(&dir).join("logs");
        let clock = Arc::new(ManualClock::new(local(2024, 3, 4)));
        let logger = Logger::builder()
            .daily_file(&log_dir, "app")
            .flags(LogFlags::empty())
            .clock(clock.clone())
            .build()
            .unwrap();
        logger.info("before");

        fs::remove_dir_all(&log_dir).unwrap();
        fs::write(&log_dir, "").unwrap();
        clock.set(local(2024, 3, 5));
        logger.info("after");
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_child(
        "test_rotation_failure_reported_on_console",
        "rotation_failure",
        Some(&temp_dir),
    );
    assert!(output.status.success());

    let text = stdout(&output);
    let report = text
        .lines()
        .find(|line| line.contains("Log rotation failed"))
        .unwrap_or_else(|| panic!("no rotation report in {}", text));
    assert!(report.contains("[ERROR]"), "{}", report);
    assert!(report.ends_with("Continuing with current file."), "{}", report);
}

#[test]
fn test_failed_init_reported_on_console() {
    if is_child("init_failure") {
        let dir = env::var(DIR_ENV).unwrap();
        assert!(facade::init(dir, "", LogLevel::Info, false, true, false).is_err());
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run_child(
        "test_failed_init_reported_on_console",
        "init_failure",
        Some(&temp_dir),
    );
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("[ERROR]"), "{}", text);
    assert!(text.contains("Invalid configuration"), "{}", text);
}
