//! Client configuration.
//!
//! Values come from environment variables natively; the browser build passes a
//! lookup over values baked in at compile time.

use std::time::Duration;

use thiserror::Error;

pub const API_URL_VAR: &str = "PROTRACK_API_URL";
pub const TIMEOUT_VAR: &str = "PROTRACK_REQUEST_TIMEOUT_SECS";
pub const LOGIN_PATH_VAR: &str = "PROTRACK_LOGIN_PATH";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without trailing slash.
    pub api_base_url: String,
    /// Per-request timeout (native only; browsers apply their own).
    pub request_timeout: Duration,
    /// Client-side route the guard redirects anonymous users to.
    pub login_path: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an http(s) URL, got '{value}'")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidTimeout { key: &'static str, value: String },

    #[error("{key} must start with '/', got '{value}'")]
    InvalidLoginPath { key: &'static str, value: String },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    key: API_URL_VAR,
                    value: url.to_string(),
                });
            }
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    key: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = lookup(LOGIN_PATH_VAR) {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidLoginPath {
                    key: LOGIN_PATH_VAR,
                    value: path,
                });
            }
            config.login_path = path;
        }

        Ok(config)
    }

    /// Absolute URL for an API path such as `/auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config =
            ClientConfig::from_lookup(lookup(&[(API_URL_VAR, "https://pm.example.com/api/")])).unwrap();
        assert_eq!(config.api_base_url, "https://pm.example.com/api");
        assert_eq!(config.endpoint("/auth/me"), "https://pm.example.com/api/auth/me");
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(API_URL_VAR, "ftp://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn timeout_and_login_path_are_read() {
        let config = ClientConfig::from_lookup(lookup(&[
            (TIMEOUT_VAR, "5"),
            (LOGIN_PATH_VAR, "/signin"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.login_path, "/signin");
    }
}
