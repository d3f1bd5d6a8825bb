//! Classification of a single upstream call.
use serde_json::Value;
use strum::IntoStaticStr;

use crate::models::RelayError;

/// Exactly one of these holds for every executed call.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum UpstreamOutcome {
    /// 2xx with a JSON body; both are passed through unchanged.
    Success { status: u16, body: Value },
    /// Non-2xx response. `body` is parsed JSON, or the raw text when it isn't JSON.
    UpstreamError {
        status: u16,
        details: String,
        body: Value,
    },
    /// No response was received (connect, DNS, TLS or timeout failure).
    TransportError { description: String },
    /// Anything else, including a 2xx body that is not JSON.
    InternalError { description: String },
}

/// A successful relay: the upstream status and JSON body, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamSuccess {
    pub status: u16,
    pub body: Value,
}

impl UpstreamOutcome {
    pub fn internal(description: impl Into<String>) -> Self {
        UpstreamOutcome::InternalError {
            description: description.into(),
        }
    }

    pub fn transport(description: impl Into<String>) -> Self {
        UpstreamOutcome::TransportError {
            description: description.into(),
        }
    }

    /// Label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        self.into()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpstreamOutcome::Success { .. })
    }

    /// Status code surfaced to the inbound caller for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            UpstreamOutcome::Success { status, .. }
            | UpstreamOutcome::UpstreamError { status, .. } => *status,
            UpstreamOutcome::TransportError { .. } => 503,
            UpstreamOutcome::InternalError { .. } => 500,
        }
    }

    pub fn into_result(self) -> Result<UpstreamSuccess, RelayError> {
        match self {
            UpstreamOutcome::Success { status, body } => Ok(UpstreamSuccess { status, body }),
            UpstreamOutcome::UpstreamError {
                status,
                details,
                body,
            } => Err(RelayError::Upstream {
                status,
                details,
                body,
            }),
            UpstreamOutcome::TransportError { description } => Err(RelayError::Transport {
                details: description,
            }),
            UpstreamOutcome::InternalError { description } => Err(RelayError::Internal {
                details: description,
            }),
        }
    }
}
