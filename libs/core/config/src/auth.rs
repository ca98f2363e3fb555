use crate::{env_required, ConfigError, FromEnv};

/// Shared-secret configuration gating mutating endpoints.
///
/// Requests must present the secret in the `TOKEN` header.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub token: String,
}

impl AuthConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl FromEnv for AuthConfig {
    /// Reads from environment variables:
    /// - TOKEN: required; the service refuses to start without it
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token: env_required("TOKEN")?,
        })
    }
}
