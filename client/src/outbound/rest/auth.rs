//! `/api/auth` facade.

use async_trait::async_trait;

use super::dto::{LoginRequestDto, RegisterRequestDto, TokenResponseDto};
use super::encode;
use crate::domain::ports::{ApiRequest, AuthApi, TokenGrant};
use crate::domain::{ApiClient, Error, LoginCredentials, Registration, User};

/// Authentication endpoints over the shared client.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    /// Wrap the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenGrant, Error> {
        let body = encode(&LoginRequestDto::from(credentials))?;
        let token: TokenResponseDto = self
            .client
            .json(ApiRequest::post("/api/auth/login").with_json(body))
            .await?;
        token.into_grant()
    }

    async fn current_user(&self) -> Result<User, Error> {
        self.client.json(ApiRequest::get("/api/auth/me")).await
    }

    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let body = encode(&RegisterRequestDto::from(registration))?;
        self.client
            .json(ApiRequest::post("/api/auth/register").with_json(body))
            .await
    }
}
