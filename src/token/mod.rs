//! Signed session tokens.
//!
//! A session token is a compact HS256 JWT whose payload carries the user ID,
//! the email and the `iat`/`exp` timestamps. Verification checks the
//! signature, the algorithm and the expiry before any claim is trusted.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth_session::{SigningSecret, SessionTokenService, Verification};
//! use chrono::Duration;
//!
//! let service = SessionTokenService::new(&SigningSecret::new("your-secret-key")?);
//! let issued = service.issue("user-123", "test@example.com", Duration::days(7))?;
//!
//! match service.verify(&issued.token) {
//!     Verification::Valid(claims) => assert_eq!(claims.user_id, "user-123"),
//!     Verification::Invalid(reason) => panic!("rejected: {reason}"),
//! }
//! ```

mod claims;
mod service;

pub use claims::SessionClaims;
pub use service::{IssuedToken, SessionTokenService, Verification};
