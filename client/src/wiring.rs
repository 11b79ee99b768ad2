//! Builders that assemble the shell from configuration or a bare transport.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::domain::ApiClient;
use crate::domain::ports::{ApiTransport, InMemoryNavigator, Navigator, TokenStore};
use crate::inbound::cli::{Shell, ShellPorts};
use crate::outbound::http::ReqwestTransport;
use crate::outbound::rest::{
    HttpAuthApi, HttpBootstrapApi, HttpCatalogueApi, HttpLogsApi, HttpProjectsApi, HttpUsersApi,
};
use crate::outbound::token_file::FileTokenStore;

/// Build a shell whose facades share one client over `transport`.
///
/// The token store and navigator are shared between the client (which reads
/// them) and the shell (which changes them).
pub fn shell_over(
    transport: Arc<dyn ApiTransport>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
) -> Shell {
    let (client, signals) = ApiClient::new(transport, tokens.clone(), navigator.clone());
    let ports = ShellPorts {
        auth: Arc::new(HttpAuthApi::new(client.clone())),
        users: Arc::new(HttpUsersApi::new(client.clone())),
        projects: Arc::new(HttpProjectsApi::new(client.clone())),
        catalogue: Arc::new(HttpCatalogueApi::new(client.clone())),
        logs: Arc::new(HttpLogsApi::new(client.clone())),
        bootstrap: Arc::new(HttpBootstrapApi::new(client)),
        tokens,
        navigator,
    };
    Shell::new(ports, signals)
}

/// Build the production shell: reqwest transport, file token store.
///
/// # Errors
///
/// Returns the reqwest error when the HTTP client cannot be constructed.
pub fn shell_from_config(config: &ClientConfig) -> Result<Shell, reqwest::Error> {
    let transport = ReqwestTransport::new(config.base_url.clone(), config.timeout)?;
    Ok(shell_over(
        Arc::new(transport),
        Arc::new(FileTokenStore::new(config.token_path.clone())),
        Arc::new(InMemoryNavigator::default()),
    ))
}
