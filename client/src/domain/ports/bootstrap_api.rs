//! Facade over the first-run and seed-data endpoints.

use async_trait::async_trait;

use crate::domain::{Acknowledgement, Error};

/// Bootstrap endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BootstrapApi: Send + Sync {
    /// `POST /api/init`: create the default administrator when none exists.
    async fn init(&self) -> Result<Acknowledgement, Error>;

    /// `POST /api/load-test-data`: seed demonstration records.
    async fn load_test_data(&self) -> Result<Acknowledgement, Error>;
}
