//! The fatal path exits the process, so it is exercised in a child process:
//! the test re-runs its own binary filtered to itself with an environment
//! variable telling the child to log fatally.

use callsite_logger::{Logger, LoggerConfig, LogLevel, Payload, FATAL_EXIT_CODE};
use std::fs;
use std::io;
use std::process::Command;
use tempfile::TempDir;

const CHILD_ENV: &str = "CALLSITE_LOGGER_FATAL_CHILD_LOG";

fn run_child(test_name: &str, log_file: &std::path::Path) -> std::process::ExitStatus {
    Command::new(std::env::current_exe().expect("test binary path"))
        .arg(test_name)
        .arg("--exact")
        .arg("--nocapture")
        .env(CHILD_ENV, log_file)
        .status()
        .expect("spawn child test")
}

#[test]
fn test_fatal_sync_writes_then_exits() {
    if let Ok(path) = std::env::var(CHILD_ENV) {
        let logger = Logger::new(LoggerConfig::file(path, LogLevel::Debug)).unwrap();
        let err = io::Error::new(io::ErrorKind::Other, "someErr");
        logger.fatal("boom", Some(&err), None);
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fatal.log");

    let status = run_child("test_fatal_sync_writes_then_exits", &log_file);

    assert!(!status.success());
    assert_eq!(status.code(), Some(FATAL_EXIT_CODE));

    let content = fs::read_to_string(&log_file).expect("fatal entry written before exit");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(" FATAL fatal_tests.rs:"));
    assert!(lines[0].ends_with("- boom"));
    assert_eq!(lines[1], "Error: someErr");
}

#[test]
fn test_fatal_async_drains_queue_before_exit() {
    if let Ok(path) = std::env::var(CHILD_ENV) {
        let mut config = LoggerConfig::file(path, LogLevel::Debug);
        config.async_enabled = true;
        config.structured = true;
        let logger = Logger::new(config).unwrap();
        for i in 0..50 {
            logger.info(format!("queued {}", i), Some(Payload::new().with_field("i", i)));
        }
        callsite_logger::fatal!(logger, "boom after {} entries", 50);
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fatal_async.jsonl");

    let status = run_child("test_fatal_async_drains_queue_before_exit", &log_file);
    assert_eq!(status.code(), Some(FATAL_EXIT_CODE));

    let content = fs::read_to_string(&log_file).expect("entries written before exit");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 51);

    let last: serde_json::Value = serde_json::from_str(lines[50]).unwrap();
    assert_eq!(last["level"], "FATAL");
    assert_eq!(last["message"], "boom after 50 entries");
    assert!(last["function"]
        .as_str()
        .unwrap()
        .ends_with("test_fatal_async_drains_queue_before_exit"));
}
