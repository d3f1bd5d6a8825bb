use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Error,
    Running,
}

/// Envelope for every response the gateway produces itself.
///
/// Successful relays return the upstream body untouched and never use this
/// type; errors and the status probe always do.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// The upstream's own error body, parsed JSON or raw text.
    #[serde(rename = "cpanel_response", skip_serializing_if = "Option::is_none")]
    pub upstream_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whm_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whm_user: Option<String>,
}

impl ApiResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            details: None,
            upstream_response: None,
            whm_host: None,
            whm_user: None,
        }
    }

    pub fn running(
        message: impl Into<String>,
        whm_host: impl Into<String>,
        whm_user: impl Into<String>,
    ) -> Self {
        Self {
            status: ResponseStatus::Running,
            message: message.into(),
            details: None,
            upstream_response: None,
            whm_host: Some(whm_host.into()),
            whm_user: Some(whm_user.into()),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_upstream_response(mut self, body: Value) -> Self {
        self.upstream_response = Some(body);
        self
    }
}
