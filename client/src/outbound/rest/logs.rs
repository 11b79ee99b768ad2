//! `/api/logs` facade.

use async_trait::async_trait;

use crate::domain::ports::{ApiRequest, LogsApi};
use crate::domain::{ApiClient, CleanupReport, Error, LogEntry};

/// Activity log endpoints over the shared client.
#[derive(Clone)]
pub struct HttpLogsApi {
    client: ApiClient,
}

impl HttpLogsApi {
    /// Wrap the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogsApi for HttpLogsApi {
    async fn list(&self, limit: u32) -> Result<Vec<LogEntry>, Error> {
        self.client
            .json(ApiRequest::get("/api/logs").with_query("limit", limit.to_string()))
            .await
    }

    async fn cleanup(&self) -> Result<CleanupReport, Error> {
        self.client
            .json(ApiRequest::delete("/api/logs/cleanup"))
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Query and decoding coverage for log endpoints.
    use super::super::test_helpers::{client_answering, last};
    use super::*;
    use crate::domain::{DEFAULT_LOG_LIMIT, log_limit};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[tokio::test]
    async fn list_sends_the_limit() {
        let (client, recorder) = client_answering(200, json!([]));
        let api = HttpLogsApi::new(client);

        api.list(log_limit(None)).await.expect("list");
        assert_eq!(
            last(&recorder).query,
            vec![("limit".to_owned(), DEFAULT_LOG_LIMIT.to_string())]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn cleanup_reports_the_count() {
        let (client, _recorder) = client_answering(200, json!({ "deleted_count": 42 }));
        let api = HttpLogsApi::new(client);

        let report = api.cleanup().await.expect("cleanup");
        assert_eq!(report.deleted_count, 42);
    }
}
