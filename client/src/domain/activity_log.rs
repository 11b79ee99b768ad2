//! Activity log entries recorded by the backend for every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default number of entries requested by `GET /api/logs`.
pub const DEFAULT_LOG_LIMIT: u32 = 100;

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Backend identifier.
    pub id: String,
    /// Acting user id.
    pub user_id: String,
    /// Acting user's name (or e-mail, depending on the endpoint).
    pub user_name: String,
    /// Action verb such as `CREATE`, `UPDATE`, `DELETE`.
    pub action: String,
    /// Entity kind such as `PROJECT` or `INVENTORY`.
    pub entity_type: String,
    /// Entity identifier.
    pub entity_id: String,
    /// Action-specific details.
    #[serde(default)]
    pub details: Option<Map<String, Value>>,
    /// When the action happened.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub timestamp: DateTime<Utc>,
}

/// Response of `DELETE /api/logs/cleanup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Number of entries removed.
    pub deleted_count: u64,
}

/// Clamp a requested log limit into a positive value.
///
/// # Examples
/// ```
/// use client::domain::{DEFAULT_LOG_LIMIT, log_limit};
///
/// assert_eq!(log_limit(None), DEFAULT_LOG_LIMIT);
/// assert_eq!(log_limit(Some(0)), 1);
/// assert_eq!(log_limit(Some(500)), 500);
/// ```
pub fn log_limit(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_LOG_LIMIT).max(1)
}
