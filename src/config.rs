//! Session cookie configuration.
//!
//! Defaults match the cookie the session manager has always issued:
//! `auth-token`, `HttpOnly`, `SameSite=Lax`, `Path=/`, seven day lifetime.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth_session::SessionConfig;
//! use chrono::Duration;
//!
//! let config = SessionConfig::from_env()?
//!     .with_secure(true)
//!     .with_lifetime(Duration::days(1));
//! ```

use std::fmt;

use chrono::Duration;

use crate::AuthError;
use crate::secret::SigningSecret;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Default session lifetime: 7 days.
pub const DEFAULT_SESSION_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

impl SameSite {
    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    pub session_lifetime: Duration,
    pub secret: SigningSecret,
}

impl SessionConfig {
    /// Creates a configuration with the default cookie attributes.
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            cookie_name: SESSION_COOKIE_NAME.to_owned(),
            cookie_path: "/".to_owned(),
            cookie_domain: None,
            cookie_secure: false,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            session_lifetime: Duration::seconds(DEFAULT_SESSION_LIFETIME_SECS),
            secret,
        }
    }

    /// Creates a configuration whose secret comes from `JWT_SECRET`.
    pub fn from_env() -> Result<Self, AuthError> {
        Ok(Self::new(SigningSecret::from_env()?))
    }

    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.cookie_same_site = same_site;
        self
    }

    /// Checks the settings a session cannot be issued without.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::ConfigurationError(
                "signing secret must not be empty".to_owned(),
            ));
        }
        if self.cookie_name.is_empty() {
            return Err(AuthError::ConfigurationError(
                "cookie_name must not be empty".to_owned(),
            ));
        }
        if self.session_lifetime <= Duration::zero() {
            return Err(AuthError::ConfigurationError(
                "session_lifetime must be positive".to_owned(),
            ));
        }
        // Browsers drop SameSite=None cookies that are not Secure.
        if self.cookie_same_site == SameSite::None && !self.cookie_secure {
            return Err(AuthError::ConfigurationError(
                "SameSite=None requires a secure cookie".to_owned(),
            ));
        }
        Ok(())
    }
}
