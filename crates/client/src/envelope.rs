//! The backend's response envelope: `{success, data?, message?}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::transport::RawResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// Decode a response body. An empty body reads as an unsuccessful,
    /// message-less envelope so status-only errors still decode.
    pub fn parse(raw: &RawResponse) -> Result<Self, serde_json::Error> {
        if raw.body.trim().is_empty() {
            return Ok(Self {
                success: false,
                data: None,
                message: None,
            });
        }
        serde_json::from_str(&raw.body)
    }
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Best-effort message from an error body, for status-based failures.
pub(crate) fn message_of(raw: &RawResponse) -> Option<String> {
    ApiEnvelope::<serde_json::Value>::parse(raw)
        .ok()
        .and_then(|e| e.message)
}
