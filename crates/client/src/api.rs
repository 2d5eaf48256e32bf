//! API client: the single path every page call takes to the backend.
//!
//! Responses are decoded from the envelope here, and a 401 from *any*
//! endpoint moves the shared session to `Anonymous`, so pages never handle
//! session expiry themselves. A 401 answering a request sent under an
//! earlier session leaves the current one alone.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::envelope::{ApiEnvelope, message_of};
use crate::error::ApiError;
use crate::session::SessionProvider;
use crate::transport::{ApiRequest, RawResponse, Transport};

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionProvider,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionProvider) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionProvider {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let raw = self.execute(ApiRequest::get(path)).await?;
        require_data(decode(&raw)?, &raw)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.execute(ApiRequest::post(path, to_json(body)?)).await?;
        require_data(decode(&raw)?, &raw)
    }

    /// Send and apply status-level policy; returns only 2xx responses.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        let epoch = self.session.epoch();

        let raw = self
            .transport
            .send(request)
            .await
            .map_err(|e| {
                tracing::warn!(method, %path, error = %e, "request failed");
                ApiError::Network(e.0)
            })?;

        match raw.status {
            401 => {
                tracing::info!(method, %path, "backend rejected session");
                self.session.expire_if(epoch);
                Err(ApiError::SessionExpired)
            }
            403 => Err(ApiError::Forbidden(
                message_of(&raw).unwrap_or_else(|| path.clone()),
            )),
            s if (200..300).contains(&s) => Ok(raw),
            _ => Err(rejected(message_of(&raw), &raw)),
        }
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("request body: {e}")))
}

fn decode<T: DeserializeOwned>(raw: &RawResponse) -> Result<ApiEnvelope<T>, ApiError> {
    ApiEnvelope::<T>::parse(raw).map_err(|e| ApiError::Decode(e.to_string()))
}

fn require_data<T>(envelope: ApiEnvelope<T>, raw: &RawResponse) -> Result<T, ApiError> {
    match (envelope.success, envelope.data) {
        (true, Some(data)) => Ok(data),
        (true, None) => Err(ApiError::Decode("response is missing `data`".to_string())),
        (false, _) => Err(rejected(envelope.message, raw)),
    }
}

fn rejected(message: Option<String>, raw: &RawResponse) -> ApiError {
    ApiError::Rejected {
        status: raw.status,
        message: message.unwrap_or_else(|| format!("HTTP {}", raw.status)),
    }
}
