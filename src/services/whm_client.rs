//! # WHM API client
//!
//! In-process entry point to the relay. Uses the library dialect (no
//! `api.version` query parameter, impersonation protocol version 2) and
//! returns errors as [`RelayError`] values instead of HTTP envelopes.
use std::{sync::Arc, time::Duration};

use log::info;
use serde_json::Value;

use crate::{
    config::CredentialContext,
    models::{CallRequest, Dialect, HttpMethod, Parameters, RelayError},
    services::{CallTranslator, RelayExecutor, RelayExecutorTrait},
};

pub struct WhmApiClient {
    credentials: Arc<CredentialContext>,
    executor: Arc<dyn RelayExecutorTrait>,
    translator: CallTranslator,
}

impl WhmApiClient {
    /// Builds a client from `WHM_*` / `CPANEL_*` environment variables.
    ///
    /// Missing configuration is returned as [`RelayError::Configuration`].
    pub fn from_env() -> Result<Self, RelayError> {
        info!("[Setup] Initializing WHM API client...");
        let credentials = Arc::new(CredentialContext::from_env()?);
        let executor = RelayExecutor::new(credentials.clone())?;
        info!("[Setup] WHM API client configured successfully.");
        Ok(Self::with_executor(credentials, Arc::new(executor)))
    }

    pub fn new(credentials: CredentialContext, timeout: Duration) -> Result<Self, RelayError> {
        let credentials = Arc::new(credentials);
        let executor = RelayExecutor::with_timeout(credentials.clone(), timeout)?;
        Ok(Self::with_executor(credentials, Arc::new(executor)))
    }

    pub fn with_executor(
        credentials: Arc<CredentialContext>,
        executor: Arc<dyn RelayExecutorTrait>,
    ) -> Self {
        Self {
            credentials,
            executor,
            translator: CallTranslator::new(Dialect::Library),
        }
    }

    pub fn credentials(&self) -> &CredentialContext {
        &self.credentials
    }

    /// Calls a WHM API function directly as the administrative identity.
    pub async fn whm_call(
        &self,
        function: &str,
        method: HttpMethod,
        params: Parameters,
    ) -> Result<Value, RelayError> {
        self.call(CallRequest::direct(function, method, params))
            .await
    }

    /// Calls a UAPI function on behalf of `cpanel_user`. Always a POST.
    pub async fn uapi_call(
        &self,
        cpanel_user: &str,
        module: &str,
        function: &str,
        params: Parameters,
    ) -> Result<Value, RelayError> {
        info!(
            "[API] Preparing UAPI call for user {} -> {}::{}",
            cpanel_user, module, function
        );
        self.call(CallRequest::impersonated(
            cpanel_user,
            module,
            function,
            HttpMethod::Post,
            params,
        ))
        .await
    }

    async fn call(&self, call: CallRequest) -> Result<Value, RelayError> {
        let request = self.translator.translate(self.credentials.host(), &call)?;
        info!("[API] Executing WHM call to endpoint: {}", request.url);
        let outcome = self.executor.execute(request).await;
        outcome.into_result().map(|success| success.body)
    }
}
