//! First-run and seed-data facade.

use async_trait::async_trait;

use crate::domain::ports::{ApiRequest, BootstrapApi};
use crate::domain::{Acknowledgement, ApiClient, Error};

/// Bootstrap endpoints over the shared client.
#[derive(Clone)]
pub struct HttpBootstrapApi {
    client: ApiClient,
}

impl HttpBootstrapApi {
    /// Wrap the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BootstrapApi for HttpBootstrapApi {
    async fn init(&self) -> Result<Acknowledgement, Error> {
        self.client.acknowledge(ApiRequest::post("/api/init")).await
    }

    async fn load_test_data(&self) -> Result<Acknowledgement, Error> {
        self.client
            .acknowledge(ApiRequest::post("/api/load-test-data"))
            .await
    }
}
