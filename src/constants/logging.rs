//! Logging configuration constants

/// Default log level when not specified
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log mode when not specified
pub const DEFAULT_LOG_MODE: &str = "stdout";

/// Default log file path for file logging
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/gateway.log";
