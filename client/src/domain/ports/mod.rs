//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_transport;
mod auth_api;
mod bootstrap_api;
mod catalogue_api;
mod logs_api;
mod navigator;
mod projects_api;
mod token_store;
mod users_api;

#[cfg(test)]
pub use api_transport::MockApiTransport;
pub use api_transport::{
    ApiRequest, ApiResponse, ApiTransport, HttpMethod, RequestBody, TransportError,
};
#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use auth_api::{AuthApi, TokenGrant};
pub use bootstrap_api::BootstrapApi;
#[cfg(test)]
pub use bootstrap_api::MockBootstrapApi;
pub use catalogue_api::CatalogueApi;
#[cfg(test)]
pub use catalogue_api::MockCatalogueApi;
pub use logs_api::LogsApi;
#[cfg(test)]
pub use logs_api::MockLogsApi;
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{InMemoryNavigator, Navigator};
#[cfg(test)]
pub use projects_api::MockProjectsApi;
pub use projects_api::ProjectsApi;
#[cfg(test)]
pub use token_store::MockTokenStore;
pub use token_store::{InMemoryTokenStore, TokenStore, TokenStoreError};
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::UsersApi;
