//! Session context for the authenticated user
//!
//! Explicit context object passed to the HTTP and stream layers; holds the
//! bearer token and user identity for the lifetime of a login.

use std::collections::HashSet;
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::ClientError;

/// An active login
struct Session {
    token: SecretString,
    username: String,
    roles: HashSet<String>,
}

/// Shared session state
pub struct SessionContext {
    inner: RwLock<Option<Session>>,
}

impl SessionContext {
    /// Create a context with no active session
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Install a session after a successful login
    pub fn set_session(&self, token: String, username: String, roles: HashSet<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *inner = Some(Session {
            token: SecretString::from(token),
            username,
            roles,
        });
    }

    /// Drop the session on logout
    pub fn clear_session(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *inner = None;
    }

    /// Whether a session is active
    pub fn is_authenticated(&self) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.is_some()
    }

    /// Whether the logged-in user holds the admin role
    pub fn is_admin(&self) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .as_ref()
            .is_some_and(|s| s.roles.contains("ROLE_ADMIN"))
    }

    /// Logged-in username, if any
    pub fn username(&self) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.as_ref().map(|s| s.username.clone())
    }

    /// Current bearer token, cloned out for a single request
    pub fn token(&self) -> Result<String, ClientError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .as_ref()
            .map(|s| s.token.expose_secret().to_string())
            .ok_or_else(|| ClientError::SessionError("no active session".to_string()))
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
