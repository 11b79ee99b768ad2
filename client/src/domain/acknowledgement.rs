//! Free-form confirmation bodies such as `{"message": "User deleted successfully"}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message-style response returned by deletes and bootstrap endpoints.
///
/// Unknown keys (for example `admin_credentials` from `POST /api/init`) are
/// kept in `extra` so the front end can print them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Backend confirmation text.
    #[serde(default)]
    pub message: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Acknowledgement {
    /// Confirmation text or `fallback` when the backend sent none.
    ///
    /// # Examples
    /// ```
    /// use client::domain::Acknowledgement;
    ///
    /// assert_eq!(Acknowledgement::default().message_or("done"), "done");
    /// ```
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn keeps_unknown_fields() {
        let ack: Acknowledgement = serde_json::from_value(json!({
            "message": "Database initialized successfully",
            "admin_credentials": { "email": "admin@sls1.com" }
        }))
        .expect("decode");
        assert_eq!(ack.message_or("-"), "Database initialized successfully");
        assert!(ack.extra.contains_key("admin_credentials"));
    }
}
