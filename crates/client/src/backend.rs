//! Authentication backend seam used by the session provider.

use async_trait::async_trait;
use serde_json::json;

use protrack_auth::{Credentials, User};

use crate::envelope::{ApiEnvelope, message_of};
use crate::error::AuthError;
use crate::transport::{ApiRequest, RawResponse, Transport};

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const ME_PATH: &str = "/auth/me";

/// The backend operations the session provider depends on.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a user (and a session cookie).
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError>;

    /// Invalidate the backend session.
    async fn logout(&self) -> Result<(), AuthError>;

    /// The user owning the current session cookie, or `None` if there is none.
    async fn current_user(&self) -> Result<Option<User>, AuthError>;
}

/// [`AuthBackend`] speaking the REST contract over any [`Transport`].
#[derive(Debug, Clone)]
pub struct RestAuthBackend<T> {
    transport: T,
}

impl<T: Transport> RestAuthBackend<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn send(&self, request: ApiRequest) -> Result<RawResponse, AuthError> {
        self.transport
            .send(request)
            .await
            .map_err(|e| AuthError::Network(e.0))
    }
}

fn decode_user(raw: &RawResponse) -> Result<ApiEnvelope<User>, AuthError> {
    ApiEnvelope::<User>::parse(raw).map_err(|e| AuthError::Decode(e.to_string()))
}

fn backend_error(raw: &RawResponse) -> AuthError {
    AuthError::Backend {
        status: raw.status,
        message: message_of(raw).unwrap_or_else(|| format!("HTTP {}", raw.status)),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: Transport> AuthBackend for RestAuthBackend<T> {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });
        let raw = self.send(ApiRequest::post(LOGIN_PATH, body)).await?;

        if raw.status == 400 || raw.is_unauthorized() {
            let message = message_of(&raw).unwrap_or_else(|| "Invalid username or password".to_string());
            return Err(AuthError::InvalidCredentials(message));
        }
        if !raw.is_success() {
            return Err(backend_error(&raw));
        }

        let envelope = decode_user(&raw)?;
        match (envelope.success, envelope.data) {
            (true, Some(user)) => Ok(user),
            (true, None) => Err(AuthError::Decode("login succeeded without user data".to_string())),
            (false, _) => Err(AuthError::InvalidCredentials(
                envelope
                    .message
                    .unwrap_or_else(|| "Invalid username or password".to_string()),
            )),
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let raw = self.send(ApiRequest::post(LOGOUT_PATH, json!({}))).await?;
        // An already-invalid session is as logged out as it gets.
        if raw.is_success() || raw.is_unauthorized() {
            Ok(())
        } else {
            Err(backend_error(&raw))
        }
    }

    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        let raw = self.send(ApiRequest::get(ME_PATH)).await?;
        if raw.is_unauthorized() {
            return Ok(None);
        }
        if !raw.is_success() {
            return Err(backend_error(&raw));
        }

        let envelope = decode_user(&raw)?;
        if envelope.success {
            Ok(envelope.data)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::transport::TransportError;
    use protrack_auth::Role;

    /// Answers every request with the same canned response.
    struct Canned(Mutex<Vec<ApiRequest>>, Result<RawResponse, TransportError>);

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl Transport for Canned {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
            self.0.lock().unwrap().push(request);
            self.1.clone()
        }
    }

    fn backend(resp: Result<RawResponse, TransportError>) -> RestAuthBackend<Canned> {
        RestAuthBackend::new(Canned(Mutex::new(Vec::new()), resp))
    }

    #[tokio::test]
    async fn login_decodes_user() {
        let body = r#"{"success":true,"data":{"username":"ann","role":"Accountant"}}"#;
        let b = backend(Ok(RawResponse::new(200, body)));

        let user = b.login(&Credentials::new("ann", "pw")).await.unwrap();
        assert_eq!(user.role, Role::ACCOUNTANT);

        let sent = b.transport.0.lock().unwrap();
        assert_eq!(sent[0].path, LOGIN_PATH);
        assert_eq!(sent[0].body.as_ref().unwrap()["username"], "ann");
    }

    #[tokio::test]
    async fn login_failure_envelope_is_invalid_credentials() {
        let body = r#"{"success":false,"message":"Invalid password"}"#;
        let b = backend(Ok(RawResponse::new(200, body)));

        let err = b.login(&Credentials::new("ann", "bad")).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials("Invalid password".to_string()));
    }

    #[tokio::test]
    async fn login_transport_failure_is_network() {
        let b = backend(Err(TransportError("connection refused".into())));
        let err = b.login(&Credentials::new("ann", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
    }

    #[tokio::test]
    async fn current_user_401_means_no_session() {
        let b = backend(Ok(RawResponse::new(401, "")));
        assert_eq!(b.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_tolerates_401() {
        let b = backend(Ok(RawResponse::new(401, "")));
        assert!(b.logout().await.is_ok());
    }

    #[tokio::test]
    async fn logout_server_error_is_reported() {
        let b = backend(Ok(RawResponse::new(502, "")));
        assert!(matches!(
            b.logout().await,
            Err(AuthError::Backend { status: 502, .. })
        ));
    }
}
