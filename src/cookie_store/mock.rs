//! In-memory cookie store that records every call made against it.
//!
//! Suitable for tests and for wiring the session manager before a real
//! transport is available.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{CookieOptions, CookieStore};
use crate::AuthError;

/// A single operation observed by [`MockCookieStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieCall {
    Set {
        name: String,
        value: String,
        options: CookieOptions,
    },
    Get {
        name: String,
    },
    Delete {
        name: String,
    },
}

#[derive(Clone, Default)]
pub struct MockCookieStore {
    cookies: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<CookieCall>>>,
}

impl MockCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `name=value`, as if sent by the client.
    pub fn with_cookie(name: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut cookies) = store.cookies.lock() {
            cookies.insert(name.into(), value.into());
        }
        store
    }

    /// Current value of a cookie, without recording a call.
    pub fn value(&self, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .ok()
            .and_then(|cookies| cookies.get(name).cloned())
    }

    pub fn calls(&self) -> Vec<CookieCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Every `set` call, as `(name, value, options)`.
    pub fn set_calls(&self) -> Vec<(String, String, CookieOptions)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CookieCall::Set {
                    name,
                    value,
                    options,
                } => Some((name, value, options)),
                _ => None,
            })
            .collect()
    }

    /// Names passed to every `delete` call.
    pub fn delete_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CookieCall::Delete { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, call: CookieCall) -> Result<(), AuthError> {
        self.calls
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?
            .push(call);
        Ok(())
    }
}

#[async_trait]
impl CookieStore for MockCookieStore {
    async fn set(
        &self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), AuthError> {
        self.cookies
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?
            .insert(name.to_owned(), value.to_owned());

        self.record(CookieCall::Set {
            name: name.to_owned(),
            value: value.to_owned(),
            options: options.clone(),
        })
    }

    async fn get(&self, name: &str) -> Result<Option<String>, AuthError> {
        self.record(CookieCall::Get {
            name: name.to_owned(),
        })?;

        let cookies = self
            .cookies
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?;

        Ok(cookies.get(name).cloned())
    }

    async fn delete(&self, name: &str) -> Result<(), AuthError> {
        self.cookies
            .lock()
            .map_err(|_| AuthError::CookieStore("Lock poisoned".to_owned()))?
            .remove(name);

        self.record(CookieCall::Delete {
            name: name.to_owned(),
        })
    }
}
