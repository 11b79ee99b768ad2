//! Port bundle handed to the shell.
//!
//! Commands only depend on domain ports so the shell can be driven by mocks
//! or the in-process fake backend in tests.

use std::sync::Arc;

use crate::domain::ports::{
    AuthApi, BootstrapApi, CatalogueApi, LogsApi, Navigator, ProjectsApi, TokenStore, UsersApi,
};

/// Parameter object bundling every port the commands use.
#[derive(Clone)]
pub struct ShellPorts {
    pub auth: Arc<dyn AuthApi>,
    pub users: Arc<dyn UsersApi>,
    pub projects: Arc<dyn ProjectsApi>,
    pub catalogue: Arc<dyn CatalogueApi>,
    pub logs: Arc<dyn LogsApi>,
    pub bootstrap: Arc<dyn BootstrapApi>,
    pub tokens: Arc<dyn TokenStore>,
    pub navigator: Arc<dyn Navigator>,
}
