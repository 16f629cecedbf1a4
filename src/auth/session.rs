//! Session state for cielo24 API authentication.
//!
//! This module provides the [`Session`] type: the credential holder a
//! [`CieloClient`](crate::CieloClient) consults for every call.

use crate::config::{ApiKey, ApiToken};

/// Credential state owned by one client instance.
///
/// A session holds at most one active token at a time, plus the long-lived
/// secure key it falls back to. The token is set by a successful login and
/// cleared by a successful logout.
///
/// # Concurrency
///
/// Mutation requires `&mut self`. Share a client across tasks only behind
/// your own lock.
///
/// # Example
///
/// ```rust
/// use cielo24::{ApiKey, ApiToken, Session};
///
/// let mut session = Session::new(Some(ApiKey::new("key").unwrap()), None);
/// assert_eq!(session.current_credential(), Some("key"));
///
/// session.on_login_success(ApiToken::new("token").unwrap());
/// assert_eq!(session.current_credential(), Some("token"));
///
/// session.on_logout_success();
/// assert_eq!(session.current_credential(), Some("key"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    key: Option<ApiKey>,
    token: Option<ApiToken>,
}

impl Session {
    /// Creates a session, optionally pre-seeded with a key and/or token.
    #[must_use]
    pub const fn new(key: Option<ApiKey>, token: Option<ApiToken>) -> Self {
        Self { key, token }
    }

    /// Returns the credential to send: the token if set, else the key.
    #[must_use]
    pub fn current_credential(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(AsRef::as_ref)
            .or_else(|| self.key.as_ref().map(AsRef::as_ref))
    }

    /// Stores the token returned by a successful login.
    pub fn on_login_success(&mut self, token: ApiToken) {
        self.token = Some(token);
    }

    /// Clears the token after a successful logout.
    pub fn on_logout_success(&mut self) {
        self.token = None;
    }

    /// Returns the active token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&ApiToken> {
        self.token.as_ref()
    }

    /// Returns the configured secure key, if any.
    #[must_use]
    pub const fn key(&self) -> Option<&ApiKey> {
        self.key.as_ref()
    }

    /// Returns `true` if a token is currently held.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}
