//! Common utilities and helpers for integration tests

use std::{net::TcpListener, sync::Arc, time::Duration};

use actix_web::web;
use cpanel_gateway::{
    config::CredentialContext,
    models::{AppState, ConfigurationError, SecretString},
    services::RelayExecutor,
};

pub const ADMIN_IDENTITY: &str = "root";
pub const API_TOKEN: &str = "INTEGRATIONTOKEN";

pub fn credentials(host: &str) -> CredentialContext {
    CredentialContext::new(host, ADMIN_IDENTITY, SecretString::new(API_TOKEN))
        .expect("valid test credentials")
}

/// State wired to a real executor pointed at `host`.
pub fn app_state(host: &str) -> web::Data<AppState> {
    let credentials = Arc::new(credentials(host));
    let executor = RelayExecutor::with_timeout(credentials.clone(), Duration::from_secs(5))
        .expect("executor should build");
    web::Data::new(AppState::new(credentials, Arc::new(executor)))
}

pub fn unconfigured_state() -> web::Data<AppState> {
    web::Data::new(AppState::unconfigured(ConfigurationError::MissingFields(
        vec!["WHM_HOST", "WHM_USER", "WHM_API_TOKEN"],
    )))
}

/// A local address nothing is listening on.
pub fn unreachable_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
