//! Session/identity provider.
//!
//! One provider is created at application start and handed to whatever needs
//! it (the API client, the guard, the menu). Cloning the handle shares the
//! same session.
//!
//! State machine:
//!
//! ```text
//! Unknown --restore--> Authenticated(user) | Anonymous
//! Anonymous --login--> Authenticated(user)
//! Authenticated --logout / expire--> Anonymous
//! ```
//!
//! Every login/logout takes a ticket from a generation counter. A login
//! result is committed only while its ticket is still the latest, so a login
//! that resolves after a logout (or after [`SessionProvider::cancel_pending`])
//! is dropped instead of resurrecting the session.
//!
//! Separately, every committed change of identity bumps a session epoch.
//! API calls record the epoch they were sent under, and a 401 only expires
//! the session if no login/logout/restore has happened since
//! (see [`SessionProvider::expire_if`]).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use protrack_auth::{Capability, Credentials, Role, SessionState, User};

use crate::backend::AuthBackend;
use crate::error::AuthError;

#[derive(Clone)]
pub struct SessionProvider {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn AuthBackend>,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    epoch: AtomicU64,
}

impl core::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("state", &*self.inner.state.borrow())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .field("epoch", &self.epoch())
            .finish()
    }
}

impl SessionProvider {
    /// Create a provider in the `Unknown` state. Call [`Self::restore`] next.
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            inner: Arc::new(Inner {
                backend,
                state,
                generation: AtomicU64::new(0),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Snapshot of the whole session state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.state.borrow().current_user().cloned()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.inner.state.borrow().has_role(role)
    }

    /// Empty `roles` denies.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.inner.state.borrow().has_any_role(roles)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.has_any_role(&capability.roles())
    }

    /// Identity epoch; changes whenever the session changes hands.
    pub fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    /// Receiver notified on every state change (for re-rendering).
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Resolve the initial `Unknown` state from the backend's session check.
    ///
    /// The result is applied only while the state is still `Unknown`; if a
    /// login finished first, the check is ignored. A failed check (network or
    /// server error) resolves to `Anonymous` so the guard stops showing the
    /// loading placeholder, and the error is returned.
    pub async fn restore(&self) -> Result<SessionState, AuthError> {
        let result = self.inner.backend.current_user().await;

        let (next, outcome) = match result {
            Ok(Some(user)) => (SessionState::Authenticated(user), Ok(())),
            Ok(None) => (SessionState::Anonymous, Ok(())),
            Err(e) => {
                tracing::warn!(error = %e, "session check failed; treating as anonymous");
                (SessionState::Anonymous, Err(e))
            }
        };

        let applied = self.inner.state.send_if_modified(|state| {
            if state.is_resolved() {
                false
            } else {
                *state = next;
                self.bump_epoch();
                true
            }
        });
        if applied {
            tracing::info!(session = self.inner.state.borrow().label(), "session restored");
        }
        outcome.map(|()| self.state())
    }

    /// Log in. On failure nothing changes.
    pub async fn login(&self, credentials: Credentials) -> Result<User, AuthError> {
        let ticket = self.next_ticket();
        tracing::info!(username = %credentials.username, "login requested");

        match self.inner.backend.login(&credentials).await {
            Ok(user) => {
                if !self.commit(ticket, SessionState::Authenticated(user.clone())) {
                    tracing::debug!(username = %user.username, "stale login result discarded");
                    return Err(AuthError::Superseded);
                }
                tracing::info!(username = %user.username, role = %user.role, "login succeeded");
                Ok(user)
            }
            Err(e) => {
                tracing::info!(username = %credentials.username, error = %e, "login failed");
                if self.is_current(ticket) {
                    Err(e)
                } else {
                    Err(AuthError::Superseded)
                }
            }
        }
    }

    /// Log out.
    ///
    /// Local state is cleared before the backend is contacted, so the UI is
    /// logged out however long the backend takes. A backend error is returned
    /// but does not restore the session.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.next_ticket();
        let mut previous = SessionState::Anonymous;
        self.inner.state.send_modify(|state| {
            previous = std::mem::replace(state, SessionState::Anonymous);
            self.bump_epoch();
        });
        tracing::info!(
            username = previous.current_user().map(|u| u.username.as_str()).unwrap_or_default(),
            "logged out locally"
        );

        self.inner.backend.logout().await.map_err(|e| {
            tracing::warn!(error = %e, "backend logout failed; local session already cleared");
            e
        })
    }

    /// The backend rejected the current session: drop to `Anonymous`.
    ///
    /// Returns whether a transition happened.
    pub fn expire(&self) -> bool {
        self.expire_if(self.epoch())
    }

    /// Like [`Self::expire`], but only if the session is still the one
    /// that was current at `epoch`. A rejection of an earlier session's
    /// request must not log out whoever signed in since.
    pub fn expire_if(&self, epoch: u64) -> bool {
        let mut stale = false;
        let changed = self.inner.state.send_if_modified(|state| {
            if !state.is_authenticated() {
                return false;
            }
            if self.epoch() != epoch {
                stale = true;
                return false;
            }
            *state = SessionState::Anonymous;
            self.bump_epoch();
            true
        });
        if changed {
            tracing::warn!("session expired; re-login required");
        } else if stale {
            tracing::debug!(epoch, current = self.epoch(), "rejection from an earlier session ignored");
        }
        changed
    }

    /// Discard the result of any login still in flight.
    pub fn cancel_pending(&self) {
        self.next_ticket();
    }

    fn next_ticket(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Only called while the state channel is locked for writing.
    fn bump_epoch(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == ticket
    }

    /// Store `next` iff `ticket` is still the latest request.
    fn commit(&self, ticket: u64, next: SessionState) -> bool {
        let mut committed = false;
        self.inner.state.send_if_modified(|state| {
            if self.is_current(ticket) {
                *state = next;
                self.bump_epoch();
                committed = true;
            }
            committed
        });
        committed
    }
}
