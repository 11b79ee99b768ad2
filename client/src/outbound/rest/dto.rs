//! Wire DTOs for request bodies and token responses.
//!
//! Domain payloads that already match the wire (projects, catalogue items,
//! users) serialise directly; only shapes that differ live here.

use serde::{Deserialize, Serialize};

use crate::domain::ports::TokenGrant;
use crate::domain::{AccessToken, Error, LoginCredentials, Registration};

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(value: &'a LoginCredentials) -> Self {
        Self {
            email: value.email(),
            password: value.password(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequestDto<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) role: &'static str,
}

impl<'a> From<&'a Registration> for RegisterRequestDto<'a> {
    fn from(value: &'a Registration) -> Self {
        Self {
            name: value.name(),
            email: value.credentials().email(),
            password: value.credentials().password(),
            role: value.role().as_str(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct TokenResponseDto {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl TokenResponseDto {
    pub(super) fn into_grant(self) -> Result<TokenGrant, Error> {
        let access_token = AccessToken::new(self.access_token)
            .ok_or_else(|| Error::unexpected("backend issued an empty access token"))?;
        Ok(TokenGrant {
            access_token,
            token_type: self.token_type,
        })
    }
}
