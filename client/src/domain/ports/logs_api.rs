//! Facade over the `/api/logs` endpoints.

use async_trait::async_trait;

use crate::domain::{CleanupReport, Error, LogEntry};

/// Activity log endpoints (administrators only).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogsApi: Send + Sync {
    /// Most recent `limit` entries.
    async fn list(&self, limit: u32) -> Result<Vec<LogEntry>, Error>;

    /// Purge old entries.
    async fn cleanup(&self) -> Result<CleanupReport, Error>;
}
