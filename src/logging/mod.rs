//! ## Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file (default "logs/gateway.log")

mod service_info;
pub use service_info::*;

use chrono::{NaiveDate, Utc};
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use std::{
    env,
    fs::{create_dir_all, File},
    path::Path,
};

use crate::constants::{DEFAULT_LOG_FILE_PATH, DEFAULT_LOG_LEVEL, DEFAULT_LOG_MODE};

/// Parses a `LOG_LEVEL` value, falling back to `Info` for anything unrecognised.
pub fn parse_level_filter(log_level: &str) -> LevelFilter {
    match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Appends the UTC date to the base path, replacing a trailing `.log`.
pub fn compute_rolled_file_path(base_file_path: &str, date: NaiveDate) -> String {
    let date_str = date.format("%Y-%m-%d").to_string();
    match base_file_path.strip_suffix(".log") {
        Some(trimmed) => format!("{}-{}.log", trimmed, date_str),
        None => format!("{}-{}.log", base_file_path, date_str),
    }
}

pub fn setup_logging() {
    let log_mode = env::var("LOG_MODE").unwrap_or_else(|_| DEFAULT_LOG_MODE.to_string());
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let level_filter = parse_level_filter(&log_level);

    if log_mode.to_lowercase() == "file" {
        let base_file_path =
            env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
        let rolled_file_path = compute_rolled_file_path(&base_file_path, Utc::now().date_naive());

        // Ensure parent directory exists
        if let Some(parent) = Path::new(&rolled_file_path).parent() {
            create_dir_all(parent).expect("Failed to create log directory");
        }

        let log_file = File::create(&rolled_file_path)
            .unwrap_or_else(|e| panic!("Unable to create log file {}: {}", rolled_file_path, e));

        WriteLogger::init(level_filter, Config::default(), log_file)
            .expect("Failed to initialize file logger");
        info!("Logging to file: {}", rolled_file_path);
    } else {
        SimpleLogger::init(level_filter, Config::default())
            .expect("Failed to initialize simple logger");
    }

    info!(
        "Logging is successfully configured (mode: {}, level: {})",
        log_mode, level_filter
    );
}
