//! `protrack-client`
//!
//! **Responsibility:** talk to the REST backend on behalf of the UI.
//!
//! This crate provides:
//! - The session/identity provider (login, logout, role predicates)
//! - An API client that every page call flows through, so a rejected session
//!   is handled in one place
//! - Typed project endpoints
//!
//! Nothing here renders; the web crate consumes these handles.

pub mod api;
pub mod backend;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod memory;
pub mod projects;
pub mod session;
pub mod transport;

pub use api::ApiClient;
pub use backend::{AuthBackend, RestAuthBackend};
pub use config::{ClientConfig, ConfigError};
pub use envelope::ApiEnvelope;
pub use error::{ApiError, AuthError};
pub use http::HttpTransport;
pub use memory::InMemoryAuthBackend;
pub use projects::ProjectsApi;
pub use session::SessionProvider;
pub use transport::{ApiRequest, Method, RawResponse, Transport, TransportError};
