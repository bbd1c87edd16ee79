//! The HMAC key used to sign session tokens.
//!
//! Held as raw bytes and redacted from `Debug`/`Display` so a logged config
//! never leaks it.

use std::fmt;

use crate::AuthError;

/// Environment variable the signing secret is read from.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// Secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LENGTH: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wraps the given key material.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` if the secret is empty; a
    /// session cannot be signed without a key.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, AuthError> {
        let secret = secret.into();

        if secret.is_empty() {
            return Err(AuthError::ConfigurationError(
                "signing secret must not be empty".to_owned(),
            ));
        }

        if secret.len() < RECOMMENDED_SECRET_LENGTH {
            log::warn!(
                target: "auth_session",
                "msg=\"weak signing secret\" len={} recommended={}",
                secret.len(),
                RECOMMENDED_SECRET_LENGTH
            );
        }

        Ok(Self(secret))
    }

    /// Reads the secret from `JWT_SECRET`.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_env_value(std::env::var(SECRET_ENV_VAR).ok())
    }

    pub(crate) fn from_env_value(value: Option<String>) -> Result<Self, AuthError> {
        match value {
            Some(value) if !value.is_empty() => Self::new(value),
            _ => Err(AuthError::ConfigurationError(format!(
                "{SECRET_ENV_VAR} is not set"
            ))),
        }
    }

    #[must_use]
    pub fn expose_secret(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

impl fmt::Display for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
