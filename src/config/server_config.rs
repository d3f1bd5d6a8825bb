use std::{env, time::Duration};

use crate::constants::{
    DEFAULT_HTTP_CLIENT_TIMEOUT_SECONDS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upstream_timeout_seconds: u64,
    /// Abort at startup when credentials are missing instead of serving
    /// incomplete-configuration errors.
    pub require_credentials: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SERVER_PORT),
            upstream_timeout_seconds: env::var("UPSTREAM_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_HTTP_CLIENT_TIMEOUT_SECONDS),
            require_credentials: env::var("REQUIRE_CREDENTIALS")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}
