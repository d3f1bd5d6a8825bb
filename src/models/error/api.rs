use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::Value;
use thiserror::Error;

use super::ConfigurationError;
use crate::models::ApiResponse;

pub const CONFIGURATION_ERROR_MESSAGE: &str = "Server configuration is incomplete.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "HTTP Error from WHM server.";
pub const TRANSPORT_ERROR_MESSAGE: &str = "Failed to connect to WHM server.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Every failure the relay can surface to an inbound caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
    #[error("Server configuration is incomplete. {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to connect to WHM server. {details}")]
    Transport { details: String },

    #[error("HTTP Error from WHM server. {details}")]
    Upstream {
        status: u16,
        details: String,
        /// Upstream error body, parsed as JSON or kept as a raw string.
        body: Value,
    },

    #[error("An internal server error occurred. {details}")]
    Internal { details: String },
}

impl RelayError {
    pub fn internal(details: impl Into<String>) -> Self {
        RelayError::Internal {
            details: details.into(),
        }
    }

    pub fn transport(details: impl Into<String>) -> Self {
        RelayError::Transport {
            details: details.into(),
        }
    }

    /// The normalized error envelope returned to the inbound caller.
    pub fn envelope(&self) -> ApiResponse {
        match self {
            RelayError::Configuration(err) => {
                ApiResponse::error(CONFIGURATION_ERROR_MESSAGE).with_details(err.to_string())
            }
            RelayError::Transport { details } => {
                ApiResponse::error(TRANSPORT_ERROR_MESSAGE).with_details(details.clone())
            }
            RelayError::Upstream { details, body, .. } => ApiResponse::error(UPSTREAM_ERROR_MESSAGE)
                .with_details(details.clone())
                .with_upstream_response(body.clone()),
            RelayError::Internal { details } => {
                ApiResponse::error(INTERNAL_ERROR_MESSAGE).with_details(details.clone())
            }
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Configuration(_) | RelayError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::Transport { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}
