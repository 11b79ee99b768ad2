//! HTTP client adapter shared by every API facade.
//!
//! Attaches the persisted bearer token, turns non-2xx responses into domain
//! [`Error`] values using the backend's `detail` field, and raises
//! [`AuthSignal::Unauthenticated`] when a request fails with 401 anywhere but
//! the login view. It never navigates or touches storage itself; the single
//! subscriber holding [`AuthSignals`] does that.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use super::ports::{ApiRequest, ApiResponse, ApiTransport, Navigator, TokenStore, TransportError};
use super::{Acknowledgement, Error, ErrorCode, Route};

/// Session-level events raised by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSignal {
    /// A request failed with 401 outside the login view.
    Unauthenticated,
}

/// Receiving half of the signal channel.
#[derive(Debug)]
pub struct AuthSignals {
    receiver: UnboundedReceiver<AuthSignal>,
}

impl AuthSignals {
    /// Take every pending signal without waiting.
    pub fn drain(&mut self) -> Vec<AuthSignal> {
        let mut pending = Vec::new();
        while let Ok(signal) = self.receiver.try_recv() {
            pending.push(signal);
        }
        pending
    }
}

/// Token-injecting, error-normalising wrapper around an [`ApiTransport`].
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    signals: UnboundedSender<AuthSignal>,
}

impl ApiClient {
    /// Build the adapter and the receiving end of its signal channel.
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> (Self, AuthSignals) {
        let (signals, receiver) = mpsc::unbounded_channel();
        (
            Self {
                transport,
                tokens,
                navigator,
                signals,
            },
            AuthSignals { receiver },
        )
    }

    /// Send `request` and return the successful response.
    ///
    /// # Errors
    ///
    /// Returns the normalised domain error for transport failures and every
    /// non-2xx status.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, Error> {
        let token = self
            .tokens
            .load()
            .await
            .map_err(|err| Error::unexpected(err.to_string()))?;
        request.bearer = token;

        let method = request.method.as_str();
        let path = request.path.clone();
        debug!(method, path = %path, authenticated = request.bearer.is_some(), "sending request");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(map_transport_error)?;
        if response.is_success() {
            debug!(method, path = %path, status = response.status, "request succeeded");
            return Ok(response);
        }

        let error = normalise_error(&response);
        debug!(
            method,
            path = %path,
            status = response.status,
            detail = error.message(),
            "request failed"
        );
        if error.is_unauthenticated() && self.navigator.current() != Route::Login {
            warn!(path = %path, "session rejected by backend");
            if self.signals.send(AuthSignal::Unauthenticated).is_err() {
                warn!("unauthenticated signal dropped: no subscriber");
            }
        }
        Err(error)
    }

    /// Send `request` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`ErrorCode::Unexpected`] when the body
    /// does not decode into `T`.
    pub async fn json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, Error> {
        let response = self.send(request).await?;
        decode(&response.body)
    }

    /// Send `request` and decode a message-style body, tolerating an empty one.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::json`].
    pub async fn acknowledge(&self, request: ApiRequest) -> Result<Acknowledgement, Error> {
        let response = self.send(request).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Acknowledgement::default());
        }
        decode(&response.body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body)
        .map_err(|err| Error::unexpected(format!("failed to decode response: {err}")))
}

fn map_transport_error(error: TransportError) -> Error {
    match error {
        TransportError::InvalidRequest { .. } => Error::invalid_request(error.to_string()),
        TransportError::Transport { .. } | TransportError::Timeout { .. } => {
            Error::transport(error.to_string())
        }
    }
}

/// Map a non-2xx response onto the error taxonomy.
fn normalise_error(response: &ApiResponse) -> Error {
    let code = match response.status {
        401 => ErrorCode::Unauthenticated,
        403 => ErrorCode::Forbidden,
        404 => ErrorCode::NotFound,
        409 | 412 => ErrorCode::Conflict,
        400..=499 => ErrorCode::InvalidRequest,
        _ => ErrorCode::Unexpected,
    };

    let body = serde_json::from_slice::<Value>(&response.body).ok();
    let detail = body.as_ref().and_then(|value| value.get("detail"));
    let message = detail.and_then(detail_message).unwrap_or_default();

    let error = Error::new(code, message).with_status(response.status);
    match detail {
        Some(detail @ Value::Array(_)) => error.with_details(detail.clone()),
        _ => error,
    }
}

/// Render FastAPI's `detail`: either a string or a list of `{msg}` entries.
fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(message) => Some(message.clone()),
        Value::Array(entries) => {
            let parts: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
