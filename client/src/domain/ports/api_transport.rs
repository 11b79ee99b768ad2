//! Driven port for sending one HTTP exchange to the studio backend.
//!
//! The domain owns the request shape so the client adapter can inject
//! tokens and interpret statuses without knowing which HTTP stack sits
//! underneath.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;
use crate::domain::{AccessToken, ImageUpload};

/// HTTP verbs used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case verb.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document.
    Json(Value),
    /// `multipart/form-data` with a single `file` part.
    Multipart(ImageUpload),
}

/// One outbound request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Verb.
    pub method: HttpMethod,
    /// Path starting with `/api`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Payload.
    pub body: RequestBody,
    /// Bearer token, filled in by the client adapter.
    pub bearer: Option<AccessToken>,
    /// `If-Match` precondition value.
    pub if_match: Option<String>,
}

impl ApiRequest {
    /// Start a request with no body, query, or credentials.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
            if_match: None,
        }
    }

    /// Shorthand for a `GET`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Shorthand for a `POST`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Shorthand for a `PATCH`.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Shorthand for a `DELETE`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach an image as the multipart `file` part.
    #[must_use]
    pub fn with_upload(mut self, upload: ImageUpload) -> Self {
        self.body = RequestBody::Multipart(upload);
        self
    }

    /// Attach an `If-Match` precondition.
    #[must_use]
    pub fn with_if_match(mut self, tag: impl Into<String>) -> Self {
        self.if_match = Some(tag.into());
        self
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_bearer(mut self, token: AccessToken) -> Self {
        self.bearer = Some(token);
        self
    }
}

/// Raw response: status plus undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body bytes; empty for `204`.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Build a response from a status and a JSON value.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Errors raised before a complete response was received.
    pub enum TransportError {
        /// Connection, TLS, or protocol failure.
        Transport { message: String } => "transport failed: {message}",
        /// The configured timeout elapsed.
        Timeout { message: String } => "request timed out: {message}",
        /// The request could not be built.
        InvalidRequest { message: String } => "request invalid: {message}",
    }
}

/// Port for executing one request/response exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send `request` and return whatever the backend answered.
    ///
    /// Non-2xx statuses are successful exchanges and come back as
    /// `Ok(ApiResponse)`.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
