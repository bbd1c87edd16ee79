//! The cookie store the session token travels through.
//!
//! The HTTP framework owns the actual cookie transport; the session manager
//! only needs `set`, `get` and `delete` on a per-request store.

mod mock;
#[cfg(feature = "cookie-jar")]
mod jar;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;
use crate::config::{SameSite, SessionConfig};

#[cfg(feature = "cookie-jar")]
pub use jar::JarCookieStore;
pub use mock::{CookieCall, MockCookieStore};

/// Attributes attached to a cookie when it is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub domain: Option<String>,
    pub expires: DateTime<Utc>,
}

impl CookieOptions {
    /// Builds the session cookie attributes for a cookie expiring at `expires`.
    pub fn for_session(config: &SessionConfig, expires: DateTime<Utc>) -> Self {
        Self {
            http_only: config.cookie_http_only,
            secure: config.cookie_secure,
            same_site: config.cookie_same_site,
            path: config.cookie_path.clone(),
            domain: config.cookie_domain.clone(),
            expires,
        }
    }
}

/// Per-request key-value cookie storage.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Sets (or replaces) a cookie.
    async fn set(
        &self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), AuthError>;

    /// Returns the value of a cookie, if present.
    async fn get(&self, name: &str) -> Result<Option<String>, AuthError>;

    /// Removes a cookie. Removing a cookie that does not exist is not an error.
    async fn delete(&self, name: &str) -> Result<(), AuthError>;
}
