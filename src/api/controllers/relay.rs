//! Relay controller.
//!
//! Turns an inbound route plus parameters into a [`CallRequest`], runs it
//! through the translator and executor held in [`AppState`], and returns the
//! upstream body unchanged on success. Failures surface as [`RelayError`],
//! whose `ResponseError` impl renders the error envelope.
use actix_web::{http::StatusCode, HttpRequest, HttpResponse};
use log::error;

use crate::{
    api::params,
    models::{AppState, CallRequest, RelayError},
};

/// `GET|POST /whmapi/{function}`.
pub async fn whm_api(
    function: String,
    req: &HttpRequest,
    body: &[u8],
    state: &AppState,
) -> Result<HttpResponse, RelayError> {
    let inbound = params::extract(req, body);
    let call = CallRequest::direct(function, inbound.method, inbound.parameters)
        .with_encoding(inbound.encoding);
    relay(call, state).await
}

/// `GET|POST /uapi/{user}/{module}/{function}`.
pub async fn uapi(
    user: String,
    module: String,
    function: String,
    req: &HttpRequest,
    body: &[u8],
    state: &AppState,
) -> Result<HttpResponse, RelayError> {
    let inbound = params::extract(req, body);
    let call = CallRequest::impersonated(user, module, function, inbound.method, inbound.parameters)
        .with_encoding(inbound.encoding);
    relay(call, state).await
}

async fn relay(call: CallRequest, state: &AppState) -> Result<HttpResponse, RelayError> {
    let (credentials, executor) = state.relay().inspect_err(|e| {
        error!("Rejecting {} call: {}", call.target.kind(), e);
    })?;

    let request = state
        .translator
        .translate(credentials.host(), &call)
        .inspect_err(|e| error!("Cannot translate {} call: {}", call.target.kind(), e))?;
    let success = executor.execute(request).await.into_result()?;
    let status = StatusCode::from_u16(success.status)
        .map_err(|e| RelayError::internal(format!("Invalid upstream status: {}", e)))?;

    Ok(HttpResponse::build(status).json(success.body))
}
