//! Client error taxonomy.
//!
//! Nothing here is fatal: every variant is handled by the component that
//! triggered it and shown to the user via [`AuthError::user_message`] /
//! [`ApiError::user_message`].

use thiserror::Error;

use protrack_core::DomainError;

const NETWORK_MESSAGE: &str = "Network error, try again.";
const EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Failures of login / logout / session check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad credentials; the session stays anonymous and the user may retry.
    #[error("authentication failed: {0}")]
    InvalidCredentials(String),

    /// The request could not complete; local state is unchanged.
    #[error("network error: {0}")]
    Network(String),

    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    /// A newer login/logout (or a navigation away) made this result irrelevant.
    #[error("request superseded")]
    Superseded,
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(msg) => msg.clone(),
            AuthError::Network(_) => NETWORK_MESSAGE.to_string(),
            AuthError::Backend { .. } | AuthError::Decode(_) => {
                "The server could not process the request.".to_string()
            }
            AuthError::Superseded => String::new(),
        }
    }
}

/// Failures of ordinary page calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401: the session was moved to anonymous.
    #[error("session expired")]
    SessionExpired,

    /// 403: valid session, insufficient role on the server side.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("network error: {0}")]
    Network(String),

    /// The backend answered `success: false` or a non-2xx status.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn user_message(&self) -> String {
        match self {
            ApiError::SessionExpired => EXPIRED_MESSAGE.to_string(),
            ApiError::Forbidden(_) => "You do not have access to this resource.".to_string(),
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Domain(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failures_share_a_generic_message() {
        assert_eq!(AuthError::Network("dns".into()).user_message(), NETWORK_MESSAGE);
        assert_eq!(ApiError::Network("reset".into()).user_message(), NETWORK_MESSAGE);
    }

    #[test]
    fn expired_session_asks_for_a_new_login() {
        assert_eq!(ApiError::SessionExpired.user_message(), EXPIRED_MESSAGE);
    }

    #[test]
    fn credential_failures_surface_backend_message() {
        let err = AuthError::InvalidCredentials("Invalid password".into());
        assert_eq!(err.user_message(), "Invalid password");
    }
}
