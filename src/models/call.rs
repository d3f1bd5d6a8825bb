//! Logical call requests and the upstream request shape they translate into.
use std::collections::BTreeMap;

use strum::{Display, IntoStaticStr};

use crate::constants::{
    GATEWAY_API_VERSION, GATEWAY_IMPERSONATION_VERSION, LIBRARY_IMPERSONATION_VERSION,
};

/// Caller-supplied parameters, keyed by name.
pub type Parameters = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// How POST parameters are encoded in the outbound body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PayloadEncoding {
    #[default]
    Form,
    Json,
}

/// Which entry point a call originates from.
///
/// The two entry points talk to the same upstream but disagree on the
/// impersonation protocol version and on whether `api.version=1` is sent.
/// Both behaviors are kept, selected by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Dialect {
    /// In-process client (`WhmApiClient`).
    Library,
    /// HTTP gateway routes.
    Gateway,
}

impl Dialect {
    /// Value of `cpanel_jsonapi_apiversion` for impersonated calls.
    pub fn impersonation_version(self) -> &'static str {
        match self {
            Dialect::Library => LIBRARY_IMPERSONATION_VERSION,
            Dialect::Gateway => GATEWAY_IMPERSONATION_VERSION,
        }
    }

    /// Value of the `api.version` query parameter, if this dialect sends one.
    pub fn api_version(self) -> Option<&'static str> {
        match self {
            Dialect::Library => None,
            Dialect::Gateway => Some(GATEWAY_API_VERSION),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CallKind {
    Direct,
    Impersonated,
}

/// What the call is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// A WHM API function called as the administrative identity.
    Direct { function: String },
    /// A UAPI function called on behalf of a cPanel account.
    Impersonated {
        user: String,
        module: String,
        function: String,
    },
}

impl CallTarget {
    pub fn kind(&self) -> CallKind {
        match self {
            CallTarget::Direct { .. } => CallKind::Direct,
            CallTarget::Impersonated { .. } => CallKind::Impersonated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub target: CallTarget,
    pub method: HttpMethod,
    pub parameters: Parameters,
    pub encoding: PayloadEncoding,
}

impl CallRequest {
    pub fn direct(function: impl Into<String>, method: HttpMethod, parameters: Parameters) -> Self {
        Self {
            target: CallTarget::Direct {
                function: function.into(),
            },
            method,
            parameters,
            encoding: PayloadEncoding::default(),
        }
    }

    pub fn impersonated(
        user: impl Into<String>,
        module: impl Into<String>,
        function: impl Into<String>,
        method: HttpMethod,
        parameters: Parameters,
    ) -> Self {
        Self {
            target: CallTarget::Impersonated {
                user: user.into(),
                module: module.into(),
                function: function.into(),
            },
            method,
            parameters,
            encoding: PayloadEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamBody {
    Form(Parameters),
    Json(Parameters),
}

impl UpstreamBody {
    pub fn parameters(&self) -> &Parameters {
        match self {
            UpstreamBody::Form(params) | UpstreamBody::Json(params) => params,
        }
    }
}

/// A fully translated outbound call, ready for the relay executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub kind: CallKind,
    pub method: HttpMethod,
    /// `{host}/json-api/{function}`, without a query string.
    pub url: String,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
    pub body: Option<UpstreamBody>,
}

impl UpstreamRequest {
    /// Looks up a parameter wherever the translator placed it.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        if let Some(body) = &self.body {
            if let Some(value) = body.parameters().get(key) {
                return Some(value.as_str());
            }
        }
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
