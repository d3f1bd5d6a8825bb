//! File logging integration test.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file (default "logs/gateway.log")
//!   Refer to `src/logging/mod.rs` for more details.
use chrono::Utc;
use cpanel_gateway::logging::{compute_rolled_file_path, setup_logging};
use serial_test::serial;
use std::{env, path::Path, thread, time::Duration};

// The global logger can be installed once per test binary, so this is the
// only test here that calls `setup_logging`.
#[test]
#[serial]
fn test_setup_logging_file_mode_creates_log_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let base = temp_dir.path().join("nested").join("gateway.log");
    let base = base.to_string_lossy().to_string();

    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_FILE_PATH", &base);

    setup_logging();
    // Sleep for logger to flush
    thread::sleep(Duration::from_millis(200));

    let expected_path = compute_rolled_file_path(&base, Utc::now().date_naive());
    assert!(
        Path::new(&expected_path).exists(),
        "Expected log file {} does not exist",
        expected_path
    );

    env::remove_var("LOG_MODE");
    env::remove_var("LOG_LEVEL");
    env::remove_var("LOG_FILE_PATH");
}
