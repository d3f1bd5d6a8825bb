//! Startup banner. Never logs secrets.
use std::env;

use log::{info, warn};

use crate::config::{CredentialContext, ServerConfig};

/// Logs service information and the configuration status at startup.
pub fn log_service_info(server: &ServerConfig, credentials: Option<&CredentialContext>) {
    info!("=== cPanel Gateway Service Starting ===");
    info!(
        "service: {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    info!("rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    info!("platform: {} ({})", env::consts::OS, env::consts::ARCH);

    if let Ok(cwd) = env::current_dir() {
        info!("working directory: {}", cwd.display());
    }

    info!(
        "listening on {}:{} (upstream timeout {}s)",
        server.host, server.port, server.upstream_timeout_seconds
    );

    match credentials {
        Some(context) => info!(
            "WHM host: {}, acting as: {}",
            context.host(),
            context.admin_identity()
        ),
        None => warn!("WHM credentials are not configured; relay routes will return errors"),
    }

    info!(
        "started at: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
}
