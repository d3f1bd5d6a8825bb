//! # Call Translator
//!
//! Maps a logical [`CallRequest`] onto the exact upstream request shape.
//!
//! ```text
//! Direct        -> {host}/json-api/{function}    params as given
//! Impersonated  -> {host}/json-api/cpanel        reserved keys + params
//! ```
//!
//! GET places parameters in the query string, POST places them in the body
//! using the inbound encoding. The gateway dialect also sends
//! `api.version=1` in the query string of every call.
//!
//! Reserved impersonation keys are seeded first, caller parameters are merged
//! over them and then the reserved keys are written again, so a caller can
//! never retarget an impersonated call. Override attempts are logged.
//!
//! The function name is encoded as one path segment, so `/`, `?` and `#`
//! in it can never leave `/json-api/`.
use log::{debug, warn};
use url::Url;

use crate::{
    constants::{
        API_VERSION_PARAM, IMPERSONATION_FUNCTION, JSON_API_PATH, RESERVED_API_VERSION_KEY,
        RESERVED_FUNCTION_KEY, RESERVED_IMPERSONATION_KEYS, RESERVED_MODULE_KEY,
        RESERVED_USER_KEY,
    },
    models::{
        CallRequest, CallTarget, Dialect, HttpMethod, Parameters, PayloadEncoding, RelayError,
        UpstreamBody, UpstreamRequest,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTranslator {
    dialect: Dialect,
}

impl CallTranslator {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Builds the upstream request for `call` against `host`.
    ///
    /// Fails with [`RelayError::Internal`] when `host` is not a usable base
    /// URL or the function name is empty, `.` or `..`.
    pub fn translate(&self, host: &str, call: &CallRequest) -> Result<UpstreamRequest, RelayError> {
        let (function, parameters) = match &call.target {
            CallTarget::Direct { function } => (function.as_str(), call.parameters.clone()),
            CallTarget::Impersonated {
                user,
                module,
                function,
            } => (
                IMPERSONATION_FUNCTION,
                self.impersonation_parameters(user, module, function, &call.parameters),
            ),
        };

        let url = endpoint_url(host, function)?;

        let mut query: Vec<(String, String)> = Vec::new();
        if let Some(version) = self.dialect.api_version() {
            query.push((API_VERSION_PARAM.to_string(), version.to_string()));
        }

        let body = match call.method {
            HttpMethod::Get => {
                query.extend(parameters);
                None
            }
            HttpMethod::Post => Some(match call.encoding {
                PayloadEncoding::Form => UpstreamBody::Form(parameters),
                PayloadEncoding::Json => UpstreamBody::Json(parameters),
            }),
        };

        debug!(
            "Translated {} call ({} dialect) to {} {}",
            call.target.kind(),
            self.dialect,
            call.method,
            url
        );

        Ok(UpstreamRequest {
            kind: call.target.kind(),
            method: call.method,
            url,
            query,
            body,
        })
    }

    fn impersonation_parameters(
        &self,
        user: &str,
        module: &str,
        function: &str,
        client_parameters: &Parameters,
    ) -> Parameters {
        let reserved = [
            (RESERVED_USER_KEY, user),
            (RESERVED_MODULE_KEY, module),
            (RESERVED_FUNCTION_KEY, function),
            (RESERVED_API_VERSION_KEY, self.dialect.impersonation_version()),
        ];

        let mut merged: Parameters = reserved
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        for (key, value) in client_parameters {
            if RESERVED_IMPERSONATION_KEYS.contains(&key.as_str()) {
                warn!(
                    "Ignoring client value for reserved impersonation key '{}' on call for user {}",
                    key, user
                );
            }
            merged.insert(key.clone(), value.clone());
        }

        for (key, value) in reserved {
            merged.insert(key.to_string(), value.to_string());
        }

        merged
    }
}

/// `{host}/json-api/{function}`, tolerating a trailing slash on `host`.
pub fn endpoint_url(host: &str, function: &str) -> Result<String, RelayError> {
    // Dot segments are dropped by the URL serializer, which would change the target.
    if matches!(function, "" | "." | "..") {
        return Err(RelayError::internal(format!(
            "Invalid WHM function name '{}'",
            function
        )));
    }

    let mut url = Url::parse(host)
        .map_err(|e| RelayError::internal(format!("Invalid upstream URL '{}': {}", host, e)))?;
    url.path_segments_mut()
        .map_err(|_| RelayError::internal(format!("Invalid upstream URL '{}'", host)))?
        .pop_if_empty()
        .push(JSON_API_PATH)
        .push(function);

    Ok(url.into())
}
