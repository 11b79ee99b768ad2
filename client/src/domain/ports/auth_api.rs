//! Facade over the `/api/auth` endpoints.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, Registration, User};

/// Token issued by `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// Bearer token to persist.
    pub access_token: AccessToken,
    /// Token scheme; the backend always answers `bearer`.
    pub token_type: String,
}

/// Authentication endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenGrant, Error>;

    /// Fetch the user that owns the persisted token.
    async fn current_user(&self) -> Result<User, Error>;

    /// Create an account (administrators only).
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
