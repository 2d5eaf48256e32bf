//! Session state and the role predicates derived from it.

use serde::{Deserialize, Serialize};

use crate::{Role, User};

/// Who is logged in, as far as the client knows.
///
/// `Unknown` is the initial state while the session check is in flight.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Unknown,
    Authenticated(User),
    Anonymous,
}

impl SessionState {
    pub fn current_user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Unknown | SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }

    /// True iff a user is authenticated and its role equals `role` exactly.
    pub fn has_role(&self, role: &Role) -> bool {
        self.current_user().is_some_and(|u| &u.role == role)
    }

    /// True iff a user is authenticated and its role is in `roles`.
    ///
    /// An empty `roles` slice denies.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.current_user()
            .is_some_and(|u| roles.iter().any(|r| r == &u.role))
    }

    /// Short label for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unknown => "unknown",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Anonymous => "anonymous",
        }
    }
}
