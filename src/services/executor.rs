//! # Relay Executor
//!
//! Performs one outbound call per [`UpstreamRequest`] and classifies what came
//! back into an [`UpstreamOutcome`]. The executor never fails: every error,
//! including a malformed URL or an undecodable body, becomes an outcome.
//!
//! Classification order:
//!
//! 1. no response received            -> `TransportError` (503)
//! 2. non-2xx response                -> `UpstreamError` (upstream status)
//! 3. 2xx response, body is not JSON  -> `InternalError` (500)
//! 4. otherwise                       -> `Success` (upstream status and body)
//!
//! There is no retry. TLS certificates are always verified.
use std::{sync::Arc, time::Duration, time::Instant};

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Client, StatusCode, Url,
};
use serde_json::Value;

use crate::{
    config::CredentialContext,
    constants::{
        DEFAULT_HTTP_CLIENT_CONNECT_TIMEOUT_SECONDS, DEFAULT_HTTP_CLIENT_POOL_IDLE_TIMEOUT_SECONDS,
        DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_PER_HOST, DEFAULT_HTTP_CLIENT_TCP_KEEPALIVE_SECONDS,
        DEFAULT_HTTP_CLIENT_TIMEOUT_SECONDS,
    },
    metrics::{UPSTREAM_CALLS, UPSTREAM_LATENCY},
    models::{RelayError, UpstreamBody, UpstreamOutcome, UpstreamRequest},
};

#[cfg(test)]
use mockall::automock;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait RelayExecutorTrait: Send + Sync {
    /// Sends `request` upstream and classifies the result.
    async fn execute(&self, request: UpstreamRequest) -> UpstreamOutcome;
}

#[derive(Debug, Clone)]
pub struct RelayExecutor {
    credentials: Arc<CredentialContext>,
    client: Client,
    timeout: Duration,
}

impl RelayExecutor {
    /// Creates an executor with the default 30 second timeout.
    pub fn new(credentials: Arc<CredentialContext>) -> Result<Self, RelayError> {
        Self::with_timeout(
            credentials,
            Duration::from_secs(DEFAULT_HTTP_CLIENT_TIMEOUT_SECONDS),
        )
    }

    pub fn with_timeout(
        credentials: Arc<CredentialContext>,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(
                DEFAULT_HTTP_CLIENT_CONNECT_TIMEOUT_SECONDS,
            ))
            .pool_max_idle_per_host(DEFAULT_HTTP_CLIENT_POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(
                DEFAULT_HTTP_CLIENT_POOL_IDLE_TIMEOUT_SECONDS,
            ))
            .tcp_keepalive(Duration::from_secs(DEFAULT_HTTP_CLIENT_TCP_KEEPALIVE_SECONDS))
            .build()
            .map_err(|e| {
                error!("Failed to build upstream HTTP client: {}", e);
                RelayError::internal(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            credentials,
            client,
            timeout,
        })
    }

    pub fn credentials(&self) -> &CredentialContext {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn authorization_value(&self) -> Result<HeaderValue, String> {
        let header = self.credentials.authorization_header();
        let mut value = HeaderValue::from_str(header.as_str())
            .map_err(|_| "Credentials contain characters not allowed in a header".to_string())?;
        value.set_sensitive(true);
        Ok(value)
    }

    async fn send(&self, request: UpstreamRequest) -> UpstreamOutcome {
        let url = match Url::parse(&request.url) {
            Ok(url) => url,
            Err(e) => {
                error!("Invalid upstream URL '{}': {}", request.url, e);
                return UpstreamOutcome::internal(format!(
                    "Invalid upstream URL '{}': {}",
                    request.url, e
                ));
            }
        };

        let authorization = match self.authorization_value() {
            Ok(value) => value,
            Err(e) => {
                error!("Cannot build authorization header: {}", e);
                return UpstreamOutcome::internal(e);
            }
        };

        info!(
            "Forwarding {} call to WHM: {} {}",
            request.kind, request.method, url
        );

        let mut builder = self
            .client
            .request(request.method.into(), url.clone())
            .header(AUTHORIZATION, authorization);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.body {
            Some(UpstreamBody::Form(params)) => builder.form(params),
            Some(UpstreamBody::Json(params)) => builder.json(params),
            None => builder,
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => {
                let e = e.without_url();
                error!("Failed to build upstream request for {}: {}", url, e);
                return UpstreamOutcome::internal(e.to_string());
            }
            Err(e) => {
                let description = describe_transport_error(e);
                error!("Request error reaching {}: {}", url, description);
                return UpstreamOutcome::transport(description);
            }
        };

        let status = response.status();
        let mut response_url = response.url().clone();
        response_url.set_query(None);

        // The connection can still drop or time out after the headers arrive.
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                let description = describe_transport_error(e);
                error!(
                    "Failed to read {} response body from {}: {}",
                    status, response_url, description
                );
                return UpstreamOutcome::transport(description);
            }
        };

        classify(status, &response_url, text)
    }
}

#[async_trait]
impl RelayExecutorTrait for RelayExecutor {
    async fn execute(&self, request: UpstreamRequest) -> UpstreamOutcome {
        let kind = request.kind;
        let kind_label: &'static str = kind.into();
        let started = Instant::now();

        let outcome = self.send(request).await;

        UPSTREAM_LATENCY
            .with_label_values(&[kind_label])
            .observe(started.elapsed().as_secs_f64());
        UPSTREAM_CALLS
            .with_label_values(&[kind_label, outcome.label()])
            .inc();
        debug!(
            "Upstream {} call finished as {} ({})",
            kind,
            outcome.label(),
            outcome.status_code()
        );

        outcome
    }
}

/// Classifies a received response. Steps 2 to 4 of the module docs.
pub fn classify(status: StatusCode, url: &Url, text: String) -> UpstreamOutcome {
    if !status.is_success() {
        let details = http_error_details(status, url);
        warn!("HTTP error occurred: {}", details);
        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
        return UpstreamOutcome::UpstreamError {
            status: status.as_u16(),
            details,
            body,
        };
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(body) => UpstreamOutcome::Success {
            status: status.as_u16(),
            body,
        },
        Err(e) => {
            error!(
                "Upstream returned {} with a body that is not valid JSON: {}",
                status, e
            );
            UpstreamOutcome::internal(format!(
                "Upstream returned {} with a body that is not valid JSON: {}",
                status.as_u16(),
                e
            ))
        }
    }
}

/// `"403 Client Error: Forbidden for url: https://host/json-api/listaccts"`.
pub fn http_error_details(status: StatusCode, url: &Url) -> String {
    let class = if status.is_client_error() {
        "Client Error"
    } else if status.is_server_error() {
        "Server Error"
    } else {
        "Error"
    };
    format!(
        "{} {}: {} for url: {}",
        status.as_u16(),
        class,
        status.canonical_reason().unwrap_or("Unknown"),
        url
    )
}

fn describe_transport_error(error: reqwest::Error) -> String {
    let error = error.without_url();
    let prefix = if error.is_timeout() {
        "Request timed out"
    } else if error.is_connect() {
        "Connection failed"
    } else {
        "Request failed"
    };
    let mut description = format!("{}: {}", prefix, error);
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        description.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    description
}
