//! Secret key handling for email redaction.

use crate::ConfigError;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the HMAC key
pub const SECRET_ENV_VAR: &str = "IM_SECRET";

/// Key used to hash email addresses before they are printed
#[derive(Debug)]
pub struct SecretKey(SecretString);

impl SecretKey {
    /// Wraps a key value, rejecting an empty one
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConfigError::MissingSecret(SECRET_ENV_VAR.to_string()));
        }
        Ok(Self(SecretString::from(value)))
    }

    /// Reads the key from the `IM_SECRET` environment variable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the key through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let value = lookup(SECRET_ENV_VAR)
            .ok_or_else(|| ConfigError::MissingSecret(SECRET_ENV_VAR.to_string()))?;
        Self::new(value)
    }

    /// Returns the raw key bytes
    pub fn expose_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}
