//! cPanel Gateway server.
//!
//! Relays `/whmapi/{function}` and `/uapi/{user}/{module}/{function}` to the
//! configured WHM host using a server-held API token.
//!
//! Configuration is read from the environment (or a `.env` file):
//!
//! * `WHM_HOST`, `WHM_USER`, `WHM_API_TOKEN` (aliases `CPANEL_HOST`,
//!   `CPANEL_USER`, `CPANEL_API_TOKEN`)
//! * `HOST`, `PORT`, `UPSTREAM_TIMEOUT_SECONDS`, `REQUIRE_CREDENTIALS`
//! * `LOG_MODE`, `LOG_LEVEL`, `LOG_FILE_PATH`
use std::sync::Arc;

use actix_web::{middleware, middleware::Logger, web, App, HttpServer};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::{info, warn};

use cpanel_gateway::{
    api::routes::configure_routes,
    config::{CredentialContext, ServerConfig},
    constants::{DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS, DEFAULT_SHUTDOWN_TIMEOUT_SECONDS},
    logging::{log_service_info, setup_logging},
    metrics::middleware::MetricsMiddleware,
    models::AppState,
    services::RelayExecutor,
};

/// Builds the shared state. With `REQUIRE_CREDENTIALS` unset the server still
/// starts without credentials and every relay route reports the problem.
fn initialize_app_state(config: &ServerConfig) -> Result<AppState> {
    let credentials = if config.require_credentials {
        CredentialContext::from_env_or_exit()
    } else {
        match CredentialContext::from_env() {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!("{}. Starting without WHM credentials.", e);
                log_service_info(config, None);
                return Ok(AppState::unconfigured(e));
            }
        }
    };

    log_service_info(config, Some(&credentials));
    let credentials = Arc::new(credentials);
    let executor = RelayExecutor::with_timeout(credentials.clone(), config.upstream_timeout())
        .wrap_err("Failed to create relay executor")?;

    Ok(AppState::new(credentials, Arc::new(executor)))
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Load environment variables from .env file
    dotenv().ok();
    setup_logging();

    let config = ServerConfig::from_env();
    let app_state = web::Data::new(initialize_app_state(&config)?);

    info!("Starting server on {}:{}", config.host, config.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(MetricsMiddleware)
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configure_routes)
    })
    .client_disconnect_timeout(std::time::Duration::from_secs(
        DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS,
    ))
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .shutdown_timeout(DEFAULT_SHUTDOWN_TIMEOUT_SECONDS);

    info!("Server running at http://{}:{}", config.host, config.port);

    server.run().await.wrap_err("Server terminated unexpectedly")
}
