//! reqwest-backed [`Transport`].

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::transport::{ApiRequest, Method, RawResponse, Transport, TransportError};

/// HTTP transport to the REST backend.
///
/// The session cookie set by the backend on login is kept by the client's
/// cookie store natively and by the browser on wasm32.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let client = build_client(&config)
            .map_err(|e| TransportError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &ClientConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(config.request_timeout)
        .build()
}

#[cfg(target_arch = "wasm32")]
fn build_client(_config: &ClientConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().build()
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.config.endpoint(&request.path);
        tracing::debug!(method = request.method.as_str(), %url, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        tracing::debug!(method = request.method.as_str(), %url, status, "response received");
        Ok(RawResponse { status, body })
    }
}
