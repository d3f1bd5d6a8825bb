//! Server-held credentials attached to every upstream call.
//!
//! Two naming schemes exist for the same three values. `WHM_*` is canonical;
//! `CPANEL_*` is read when the canonical variable is unset or empty.
//!
//! | Value               | Canonical       | Alias              |
//! |---------------------|-----------------|--------------------|
//! | upstream host       | `WHM_HOST`      | `CPANEL_HOST`      |
//! | admin identity      | `WHM_USER`      | `CPANEL_USER`      |
//! | API token           | `WHM_API_TOKEN` | `CPANEL_API_TOKEN` |
use std::env;

use log::{error, info};

use crate::{
    constants::{
        ENV_CPANEL_API_TOKEN, ENV_CPANEL_HOST, ENV_CPANEL_USER, ENV_WHM_API_TOKEN, ENV_WHM_HOST,
        ENV_WHM_USER, WHM_AUTHORIZATION_SCHEME,
    },
    models::{ConfigurationError, SecretString},
};

/// Immutable after construction; safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct CredentialContext {
    host: String,
    admin_identity: String,
    token: SecretString,
}

impl CredentialContext {
    /// Builds a context from explicit values. All three must be non-empty.
    pub fn new(
        host: impl Into<String>,
        admin_identity: impl Into<String>,
        token: SecretString,
    ) -> Result<Self, ConfigurationError> {
        let host = host.into();
        let admin_identity = admin_identity.into();

        let mut missing = Vec::new();
        if host.trim().is_empty() {
            missing.push(ENV_WHM_HOST);
        }
        if admin_identity.trim().is_empty() {
            missing.push(ENV_WHM_USER);
        }
        if token.is_empty() {
            missing.push(ENV_WHM_API_TOKEN);
        }
        if !missing.is_empty() {
            return Err(ConfigurationError::MissingFields(missing));
        }

        Ok(Self {
            host,
            admin_identity,
            token,
        })
    }

    /// Reads the context from the process environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the context through `lookup`, honouring the alias names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |canonical: &str, alias: &str| {
            lookup(canonical)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| lookup(alias).filter(|v| !v.trim().is_empty()))
                .unwrap_or_default()
        };

        let host = read(ENV_WHM_HOST, ENV_CPANEL_HOST);
        let admin_identity = read(ENV_WHM_USER, ENV_CPANEL_USER);
        let token = SecretString::from(read(ENV_WHM_API_TOKEN, ENV_CPANEL_API_TOKEN));

        let context = Self::new(host, admin_identity, token)?;
        info!(
            "Credential context configured for {} as {}",
            context.host, context.admin_identity
        );
        Ok(context)
    }

    /// Standalone-server entry point: a missing value aborts the process.
    pub fn from_env_or_exit() -> Self {
        match Self::from_env() {
            Ok(context) => context,
            Err(e) => {
                error!("CRITICAL: {}. Check your environment or .env file.", e);
                std::process::exit(1);
            }
        }
    }

    /// Upstream base URL, e.g. `https://whm.example.com:2087`.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn admin_identity(&self) -> &str {
        &self.admin_identity
    }

    /// `whm {identity}:{token}`.
    pub fn authorization_header(&self) -> SecretString {
        SecretString::from(format!(
            "{} {}:{}",
            WHM_AUTHORIZATION_SCHEME,
            self.admin_identity,
            self.token.as_str()
        ))
    }
}
