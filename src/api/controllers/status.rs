//! Status probe reporting whether the gateway can relay calls.
use actix_web::HttpResponse;
use log::error;

use crate::models::{ApiResponse, AppState};

pub const RUNNING_MESSAGE: &str =
    "cPanel Advanced MCP Server is active. Ready for WHM and UAPI calls.";
pub const INCOMPLETE_CONFIGURATION_MESSAGE: &str = concat!(
    "Server configuration is incomplete. Please set WHM_HOST, WHM_USER, ",
    "and WHM_API_TOKEN environment variables."
);

/// Reports the upstream host and identity when configured. Never the token.
pub async fn get_status(state: &AppState) -> HttpResponse {
    match state.credentials() {
        Some(credentials) if state.is_configured() => HttpResponse::Ok().json(
            ApiResponse::running(RUNNING_MESSAGE, credentials.host(), credentials.admin_identity()),
        ),
        _ => {
            error!("Status probe: {}", INCOMPLETE_CONFIGURATION_MESSAGE);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error(INCOMPLETE_CONFIGURATION_MESSAGE))
        }
    }
}
