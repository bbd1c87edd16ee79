//! [`CookieStore`] over a `cookie::CookieJar`.
//!
//! Seed it from the request's `Cookie` header, hand it to the session
//! manager, then copy [`JarCookieStore::set_cookie_headers`] onto the
//! response.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cookie::time::OffsetDateTime;
use cookie::{Cookie, CookieJar, SameSite as JarSameSite};

use super::{CookieOptions, CookieStore};
use crate::AuthError;
use crate::config::{SameSite, SessionConfig};

/// Path and domain a cookie was set with. A removal cookie only takes
/// effect in the browser when both match.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CookieScope {
    path: String,
    domain: Option<String>,
}

impl Default for CookieScope {
    fn default() -> Self {
        Self {
            path: "/".to_owned(),
            domain: None,
        }
    }
}

struct JarState {
    jar: CookieJar,
    /// Scopes of cookies set through this store.
    scopes: HashMap<String, CookieScope>,
}

pub struct JarCookieStore {
    state: Mutex<JarState>,
    /// Scope used to remove cookies that were not set through this store.
    removal_scope: CookieScope,
}

impl JarCookieStore {
    pub fn new() -> Self {
        Self::with_jar(CookieJar::new())
    }

    /// Creates a store holding the cookies of a request `Cookie` header.
    ///
    /// Unparseable pairs are skipped.
    pub fn from_cookie_header(header: &str) -> Self {
        let mut jar = CookieJar::new();
        for cookie in Cookie::split_parse(header.to_owned()).flatten() {
            jar.add_original(cookie.into_owned());
        }

        Self::with_jar(jar)
    }

    fn with_jar(jar: CookieJar) -> Self {
        Self {
            state: Mutex::new(JarState {
                jar,
                scopes: HashMap::new(),
            }),
            removal_scope: CookieScope::default(),
        }
    }

    /// Path attached to removal cookies. Must match the path the cookie was set with.
    #[must_use]
    pub fn with_removal_path(mut self, path: impl Into<String>) -> Self {
        self.removal_scope.path = path.into();
        self
    }

    /// Domain attached to removal cookies. Must match the domain the cookie was set with.
    #[must_use]
    pub fn with_removal_domain(mut self, domain: impl Into<String>) -> Self {
        self.removal_scope.domain = Some(domain.into());
        self
    }

    /// Removes cookies with the path and domain the session config sets them with.
    #[must_use]
    pub fn with_session_scope(mut self, config: &SessionConfig) -> Self {
        self.removal_scope = CookieScope {
            path: config.cookie_path.clone(),
            domain: config.cookie_domain.clone(),
        };
        self
    }

    /// `Set-Cookie` header values for every change made through this store.
    pub fn set_cookie_headers(&self) -> Result<Vec<String>, AuthError> {
        let state = self
            .state
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?;

        Ok(state.jar.delta().map(|cookie| cookie.to_string()).collect())
    }
}

impl Default for JarCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

fn to_jar_same_site(same_site: SameSite) -> JarSameSite {
    match same_site {
        SameSite::None => JarSameSite::None,
        SameSite::Lax => JarSameSite::Lax,
        SameSite::Strict => JarSameSite::Strict,
    }
}

fn build_cookie(
    name: &str,
    value: &str,
    options: &CookieOptions,
) -> Result<Cookie<'static>, AuthError> {
    let expires = OffsetDateTime::from_unix_timestamp(options.expires.timestamp())
        .map_err(|e| AuthError::CookieStore(format!("invalid cookie expiry: {e}")))?;

    let mut builder = Cookie::build((name.to_owned(), value.to_owned()))
        .path(options.path.clone())
        .http_only(options.http_only)
        .secure(options.secure)
        .same_site(to_jar_same_site(options.same_site))
        .expires(expires);

    if let Some(ref domain) = options.domain {
        builder = builder.domain(domain.clone());
    }

    Ok(builder.build())
}

fn build_removal_cookie(name: &str, scope: &CookieScope) -> Cookie<'static> {
    let mut builder = Cookie::build((name.to_owned(), "")).path(scope.path.clone());

    if let Some(ref domain) = scope.domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

#[async_trait]
impl CookieStore for JarCookieStore {
    async fn set(
        &self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), AuthError> {
        let cookie = build_cookie(name, value, options)?;

        let mut state = self
            .state
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?;

        state.scopes.insert(
            name.to_owned(),
            CookieScope {
                path: options.path.clone(),
                domain: options.domain.clone(),
            },
        );
        state.jar.add(cookie);

        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<String>, AuthError> {
        let state = self
            .state
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?;

        Ok(state.jar.get(name).map(|cookie| cookie.value().to_owned()))
    }

    async fn delete(&self, name: &str) -> Result<(), AuthError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?;

        let scope = state
            .scopes
            .remove(name)
            .unwrap_or_else(|| self.removal_scope.clone());

        // The jar only emits a removal cookie for cookies it saw in the
        // request; the client may hold one the request did not carry.
        state
            .jar
            .add_original(Cookie::new(name.to_owned(), String::new()));
        state.jar.remove(build_removal_cookie(name, &scope));

        Ok(())
    }
}
