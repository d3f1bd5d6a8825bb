//! Shared, read-only state handed to every request handler.
use std::sync::Arc;

use crate::{
    config::CredentialContext,
    constants::{ENV_WHM_API_TOKEN, ENV_WHM_HOST, ENV_WHM_USER},
    models::{ConfigurationError, Dialect, RelayError},
    services::{CallTranslator, RelayExecutorTrait},
};

pub struct AppState {
    credentials: Option<Arc<CredentialContext>>,
    executor: Option<Arc<dyn RelayExecutorTrait>>,
    configuration_error: Option<ConfigurationError>,
    pub translator: CallTranslator,
}

impl AppState {
    pub fn new(
        credentials: Arc<CredentialContext>,
        executor: Arc<dyn RelayExecutorTrait>,
    ) -> Self {
        Self {
            credentials: Some(credentials),
            executor: Some(executor),
            configuration_error: None,
            translator: CallTranslator::new(Dialect::Gateway),
        }
    }

    /// State for a server started without usable credentials. Every relay
    /// route answers with the incomplete-configuration envelope.
    pub fn unconfigured(error: ConfigurationError) -> Self {
        Self {
            credentials: None,
            executor: None,
            configuration_error: Some(error),
            translator: CallTranslator::new(Dialect::Gateway),
        }
    }

    pub fn credentials(&self) -> Option<&CredentialContext> {
        self.credentials.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some() && self.executor.is_some()
    }

    /// Credentials and executor, or the configuration error that prevents relaying.
    pub fn relay(&self) -> Result<(&CredentialContext, &dyn RelayExecutorTrait), RelayError> {
        match (&self.credentials, &self.executor) {
            (Some(credentials), Some(executor)) => Ok((credentials.as_ref(), executor.as_ref())),
            _ => Err(RelayError::Configuration(
                self.configuration_error.clone().unwrap_or_else(|| {
                    ConfigurationError::MissingFields(vec![
                        ENV_WHM_HOST,
                        ENV_WHM_USER,
                        ENV_WHM_API_TOKEN,
                    ])
                }),
            )),
        }
    }
}
