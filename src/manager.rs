//! Session lifecycle: create, read and delete the session cookie.

use std::fmt;

use crate::AuthError;
use crate::config::SessionConfig;
use crate::cookie_store::{CookieOptions, CookieStore};
use crate::token::{SessionClaims, SessionTokenService, Verification};

/// Issues, reads and revokes the signed session cookie.
///
/// Holds only immutable configuration, so one instance can be shared by
/// every request; each call takes the request's own cookie store.
#[derive(Clone)]
pub struct SessionManager {
    config: SessionConfig,
    tokens: SessionTokenService,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` if the configuration cannot
    /// issue sessions (empty secret or cookie name, non-positive lifetime).
    pub fn new(config: SessionConfig) -> Result<Self, AuthError> {
        config.validate()?;
        let tokens = SessionTokenService::new(&config.secret);

        Ok(Self { config, tokens })
    }

    /// Creates a session manager whose secret comes from `JWT_SECRET`.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::new(SessionConfig::from_env()?)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Signs a session for the user and stores it in the session cookie.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - cookie set
    /// - `Err(AuthError::Validation)` - empty `user_id` or `email`
    /// - `Err(_)` - signing or cookie store failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_session", skip_all, err)
    )]
    pub async fn create_session<S>(
        &self,
        store: &S,
        user_id: &str,
        email: &str,
    ) -> Result<(), AuthError>
    where
        S: CookieStore + ?Sized,
    {
        if user_id.is_empty() {
            return Err(AuthError::Validation("user_id must not be empty".to_owned()));
        }
        if email.is_empty() {
            return Err(AuthError::Validation("email must not be empty".to_owned()));
        }

        let issued = self
            .tokens
            .issue(user_id, email, self.config.session_lifetime)?;
        let options = CookieOptions::for_session(&self.config, issued.expires_at);

        store
            .set(&self.config.cookie_name, &issued.token, &options)
            .await?;

        log::info!(
            target: "auth_session",
            "msg=\"session created\" user_id={} expires_at={}",
            user_id,
            issued.expires_at.to_rfc3339()
        );

        Ok(())
    }

    /// Returns the claims of the current session, or `None` if there is no
    /// valid session.
    ///
    /// Missing, malformed, tampered and expired cookies all yield `None`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "get_session", skip_all)
    )]
    pub async fn get_session<S>(&self, store: &S) -> Option<SessionClaims>
    where
        S: CookieStore + ?Sized,
    {
        self.verify_session(store)
            .await
            .and_then(Verification::into_claims)
    }

    /// Verifies the session cookie, keeping the rejection reason.
    ///
    /// Returns `None` when the request carries no session cookie.
    pub async fn verify_session<S>(&self, store: &S) -> Option<Verification>
    where
        S: CookieStore + ?Sized,
    {
        let token = match store.get(&self.config.cookie_name).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                log::debug!(target: "auth_session", "msg=\"no session cookie\"");
                return None;
            }
            Err(err) => {
                log::warn!(
                    target: "auth_session",
                    "msg=\"session cookie unreadable\" error=\"{}\"",
                    err
                );
                return None;
            }
        };

        let verification = self.tokens.verify(&token);

        match verification {
            Verification::Valid(ref claims) => {
                log::debug!(
                    target: "auth_session",
                    "msg=\"session verified\" user_id={} expires_at={}",
                    claims.user_id,
                    claims
                        .expires_at()
                        .map(|at| at.to_rfc3339())
                        .unwrap_or_default()
                );
            }
            Verification::Invalid(AuthError::TokenExpired) => {
                log::debug!(target: "auth_session", "msg=\"session expired\"");
            }
            Verification::Invalid(ref reason) => {
                log::warn!(
                    target: "auth_session",
                    "msg=\"session token rejected\" reason=\"{}\" token_prefix=\"{}...\"",
                    reason,
                    token.chars().take(8).collect::<String>()
                );
            }
        }

        Some(verification)
    }

    /// Removes the session cookie. Safe to call when no session exists.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_session", skip_all, err)
    )]
    pub async fn delete_session<S>(&self, store: &S) -> Result<(), AuthError>
    where
        S: CookieStore + ?Sized,
    {
        store.delete(&self.config.cookie_name).await?;

        log::info!(target: "auth_session", "msg=\"session deleted\"");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{MockCookieStore, SigningSecret};

    const SECRET: &str = "test-secret-32-bytes-long-key-01";

    struct FailingCookieStore;

    #[async_trait]
    impl CookieStore for FailingCookieStore {
        async fn set(
            &self,
            _name: &str,
            _value: &str,
            _options: &CookieOptions,
        ) -> Result<(), AuthError> {
            Err(AuthError::CookieStore("unavailable".to_owned()))
        }

        async fn get(&self, _name: &str) -> Result<Option<String>, AuthError> {
            Err(AuthError::CookieStore("unavailable".to_owned()))
        }

        async fn delete(&self, _name: &str) -> Result<(), AuthError> {
            Err(AuthError::CookieStore("unavailable".to_owned()))
        }
    }

    fn manager() -> SessionManager {
        let config = SessionConfig::new(SigningSecret::new(SECRET).unwrap());
        SessionManager::new(config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SessionConfig::new(SigningSecret::new(SECRET).unwrap())
            .with_lifetime(Duration::seconds(-1));

        let result = SessionManager::new(config);
        assert!(matches!(result, Err(AuthError::ConfigurationError(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", manager());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(SECRET));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_input() {
        let manager = manager();
        let store = MockCookieStore::new();

        let result = manager.create_session(&store, "", "a@example.com").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        let result = manager.create_session(&store, "user-1", "").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_propagates_store_failure() {
        let manager = manager();

        let result = manager
            .create_session(&FailingCookieStore, "user-1", "one@example.com")
            .await;

        assert_eq!(
            result,
            Err(AuthError::CookieStore("unavailable".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_get_swallows_store_failure() {
        let manager = manager();
        assert!(manager.get_session(&FailingCookieStore).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_propagates_store_failure() {
        let manager = manager();
        assert!(manager.delete_session(&FailingCookieStore).await.is_err());
    }

    #[tokio::test]
    async fn test_verify_session_keeps_reason() {
        let manager = manager();

        let missing = MockCookieStore::new();
        assert_eq!(manager.verify_session(&missing).await, None);

        let garbage = MockCookieStore::with_cookie("auth-token", "not-a-valid-jwt");
        assert_eq!(
            manager.verify_session(&garbage).await,
            Some(Verification::Invalid(AuthError::TokenInvalid))
        );

        let expired_token = SessionTokenService::new(&SigningSecret::new(SECRET).unwrap())
            .issue_at(
                "user-1",
                "one@example.com",
                Duration::days(7),
                Utc::now() - Duration::days(30),
            )
            .unwrap()
            .token;
        let expired = MockCookieStore::with_cookie("auth-token", expired_token);
        assert_eq!(
            manager.verify_session(&expired).await,
            Some(Verification::Invalid(AuthError::TokenExpired))
        );
    }

    #[tokio::test]
    async fn test_custom_cookie_name() {
        let config =
            SessionConfig::new(SigningSecret::new(SECRET).unwrap()).with_cookie_name("sid");
        let manager = SessionManager::new(config).unwrap();
        let store = MockCookieStore::new();

        manager
            .create_session(&store, "user-1", "one@example.com")
            .await
            .unwrap();

        assert!(store.value("sid").is_some());
        assert!(store.value("auth-token").is_none());
        assert_eq!(
            manager.get_session(&store).await.map(|c| c.user_id),
            Some("user-1".to_owned())
        );
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let manager = manager();
        let store = MockCookieStore::new();
        let dyn_store: &dyn CookieStore = &store;

        manager
            .create_session(dyn_store, "user-1", "one@example.com")
            .await
            .unwrap();

        assert!(manager.get_session(dyn_store).await.is_some());
    }
}
