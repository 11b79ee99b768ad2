//! REST facades implementing the domain API ports over [`ApiClient`].
//!
//! Each facade is a typed request builder: it picks the path, encodes the
//! body, and decodes the response. Token handling, error normalisation, and
//! 401 signalling all happen in the shared client.
//!
//! [`ApiClient`]: crate::domain::ApiClient

mod auth;
mod bootstrap;
mod catalogue;
mod dto;
mod logs;
mod projects;
mod users;

pub use auth::HttpAuthApi;
pub use bootstrap::HttpBootstrapApi;
pub use catalogue::HttpCatalogueApi;
pub use logs::HttpLogsApi;
pub use projects::HttpProjectsApi;
pub use users::HttpUsersApi;

use serde::Serialize;
use serde_json::Value;

use crate::domain::Error;

fn encode<T: Serialize>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value)
        .map_err(|err| Error::unexpected(format!("failed to encode request: {err}")))
}

#[cfg(test)]
mod test_helpers {
    //! Shared wiring for facade tests.
    use std::sync::Arc;

    use serde_json::Value;

    use crate::domain::ports::{ApiRequest, InMemoryNavigator, InMemoryTokenStore, RequestBody};
    use crate::domain::{AccessToken, ApiClient, Route};
    use crate::test_support::RecordingTransport;

    /// Client whose transport always answers `status`/`body`.
    pub(super) fn client_answering(
        status: u16,
        body: Value,
    ) -> (ApiClient, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::answering(status, body));
        let tokens = AccessToken::new("test-token")
            .map(InMemoryTokenStore::with_token)
            .unwrap_or_default();
        let (client, _signals) = ApiClient::new(
            transport.clone(),
            Arc::new(tokens),
            Arc::new(InMemoryNavigator::starting_at(Route::Projects)),
        );
        (client, transport)
    }

    /// Path and JSON body of the last request.
    pub(super) fn recorded_json(recorder: &RecordingTransport) -> (String, Value) {
        let request = last(recorder);
        let body = match request.body {
            RequestBody::Json(body) => body,
            other => panic!("expected JSON body, got {other:?}"),
        };
        (request.path, body)
    }

    /// Last request sent.
    pub(super) fn last(recorder: &RecordingTransport) -> ApiRequest {
        recorder.last_request().expect("a request was sent")
    }
}
