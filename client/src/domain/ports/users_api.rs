//! Facade over the `/api/users` endpoints.

use async_trait::async_trait;

use crate::domain::{Acknowledgement, Error, User, UserId};

/// User management endpoints (administrators only).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// All accounts.
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// One account.
    async fn get(&self, id: &UserId) -> Result<User, Error>;

    /// Remove an account.
    async fn delete(&self, id: &UserId) -> Result<Acknowledgement, Error>;
}
