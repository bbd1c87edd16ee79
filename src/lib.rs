//! Signed session cookies.
//!
//! Issues an HS256 JWT carrying `userId` and `email`, stores it in the
//! `auth-token` cookie, reads it back with full signature and expiry checks,
//! and deletes it on logout.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth_session::{MockCookieStore, SessionConfig, SessionManager};
//!
//! let manager = SessionManager::new(SessionConfig::from_env()?)?;
//! let cookies = MockCookieStore::new();
//!
//! manager.create_session(&cookies, "user-123", "test@example.com").await?;
//! let session = manager.get_session(&cookies).await;
//! assert_eq!(session.unwrap().user_id, "user-123");
//!
//! manager.delete_session(&cookies).await?;
//! ```

pub mod config;
pub mod cookie_store;
pub mod manager;
pub mod secret;
pub mod token;

pub use config::{SameSite, SessionConfig};
pub use cookie_store::{CookieCall, CookieOptions, CookieStore, MockCookieStore};
#[cfg(feature = "cookie-jar")]
pub use cookie_store::JarCookieStore;
pub use manager::SessionManager;
pub use secret::SigningSecret;
pub use token::{IssuedToken, SessionClaims, SessionTokenService, Verification};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    ConfigurationError(String),
    Validation(String),
    TokenSigningFailed(String),
    TokenExpired,
    TokenInvalid,
    CookieStore(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AuthError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AuthError::TokenSigningFailed(msg) => write!(f, "Failed to sign token: {}", msg),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenInvalid => write!(f, "Invalid token"),
            AuthError::CookieStore(msg) => write!(f, "Cookie store error: {}", msg),
        }
    }
}
