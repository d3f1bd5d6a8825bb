use thiserror::Error;

/// Raised when the credential context cannot be built from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Server configuration incomplete. Missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ConfigurationError {
    /// Canonical names of the configuration values that were absent or empty.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ConfigurationError::MissingFields(fields) => fields,
        }
    }
}
