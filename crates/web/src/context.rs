//! Application context: everything pages need, created once at start-up and
//! handed down explicitly.

use std::sync::Arc;

use anyhow::Context;

use protrack_auth::{NavigationEntry, RouteTable};
use protrack_client::{
    ApiClient, AuthBackend, ClientConfig, HttpTransport, ProjectsApi, RestAuthBackend,
    SessionProvider, Transport,
};

use crate::menu::navigation_entries;
use crate::pages::Page;
use crate::routes::route_table;

#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionProvider,
    pub api: ApiClient,
    pub projects: ProjectsApi,
    pub routes: Arc<RouteTable<Page>>,
    pub menu: Arc<Vec<NavigationEntry>>,
}

impl AppContext {
    /// Wire the HTTP transport, REST auth backend and session for `config`.
    pub fn connect(config: ClientConfig) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(config.clone()).context("failed to create HTTP transport")?;
        let backend = Arc::new(RestAuthBackend::new(transport.clone()));
        Self::with_parts(config, backend, Arc::new(transport))
    }

    /// Wire the context from explicit parts (tests, alternative backends).
    pub fn with_parts(
        config: ClientConfig,
        backend: Arc<dyn AuthBackend>,
        transport: Arc<dyn Transport>,
    ) -> anyhow::Result<Self> {
        let routes = route_table(&config.login_path).context("invalid route table")?;
        let session = SessionProvider::new(backend);
        let api = ApiClient::new(transport, session.clone());
        let projects = ProjectsApi::new(api.clone());

        tracing::info!(
            api = %config.api_base_url,
            routes = routes.routes().len(),
            "application context ready"
        );

        Ok(Self {
            config,
            session,
            api,
            projects,
            routes: Arc::new(routes),
            menu: Arc::new(navigation_entries()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protrack_auth::{Credentials, Role, SessionState, User};
    use protrack_client::InMemoryAuthBackend;

    #[test]
    fn connect_starts_with_unknown_session() {
        let ctx = AppContext::connect(ClientConfig::default()).unwrap();
        assert_eq!(ctx.session.state(), SessionState::Unknown);
        assert_eq!(ctx.routes.login_path(), "/login");
        assert!(!ctx.menu.is_empty());
    }

    #[tokio::test]
    async fn api_client_shares_the_session() {
        let backend = InMemoryAuthBackend::new().with_account(User::new("ann", Role::ACCOUNTANT), "pw");
        let transport = HttpTransport::new(ClientConfig::default()).unwrap();
        let ctx = AppContext::with_parts(ClientConfig::default(), Arc::new(backend), Arc::new(transport)).unwrap();

        ctx.session.login(Credentials::new("ann", "pw")).await.unwrap();
        assert!(ctx.api.session().has_role(&Role::ACCOUNTANT));
    }
}
