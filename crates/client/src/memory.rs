//! In-memory [`AuthBackend`] for tests and offline demos.

use std::sync::Mutex;

use async_trait::async_trait;

use protrack_auth::{Credentials, User};

use crate::backend::AuthBackend;
use crate::error::AuthError;

#[derive(Debug, Default)]
pub struct InMemoryAuthBackend {
    accounts: Vec<(User, String)>,
    active: Mutex<Option<String>>,
}

impl InMemoryAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    pub fn with_account(mut self, user: User, password: impl Into<String>) -> Self {
        self.accounts.push((user, password.into()));
        self
    }

    /// Start with `username` already logged in (as if a cookie survived a reload).
    pub fn with_active_session(self, username: impl Into<String>) -> Self {
        if let Ok(mut active) = self.active.lock() {
            *active = Some(username.into());
        }
        self
    }

    /// Drop the backend-side session, as a server-side expiry would.
    pub fn invalidate_session(&self) {
        if let Ok(mut active) = self.active.lock() {
            *active = None;
        }
    }

    fn find(&self, username: &str) -> Option<&(User, String)> {
        self.accounts.iter().find(|(u, _)| u.username == username)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthBackend for InMemoryAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let (user, password) = self
            .find(&credentials.username)
            .ok_or_else(|| AuthError::InvalidCredentials("Unknown user".to_string()))?;
        if password != &credentials.password {
            return Err(AuthError::InvalidCredentials("Invalid password".to_string()));
        }

        let mut active = self
            .active
            .lock()
            .map_err(|_| AuthError::Backend {
                status: 500,
                message: "session store poisoned".to_string(),
            })?;
        *active = Some(user.username.clone());
        Ok(user.clone())
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.invalidate_session();
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        let active = self
            .active
            .lock()
            .map_err(|_| AuthError::Backend {
                status: 500,
                message: "session store poisoned".to_string(),
            })?
            .clone();
        Ok(active.and_then(|name| self.find(&name).map(|(u, _)| u.clone())))
    }
}
