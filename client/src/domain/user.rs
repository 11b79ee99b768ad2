//! User data model as returned by `GET /api/auth/me` and `GET /api/users`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::{AssignedRole, Capability};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier was not a UUID.
    InvalidId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the backend as a UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Read-only cached copy of a backend user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier.
    pub id: UserId,
    /// Full display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Role string as issued by the backend.
    pub role: AssignedRole,
    /// Inactive accounts cannot log in.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Last successful login, if any.
    #[serde(default, deserialize_with = "crate::domain::timestamp::lenient_option")]
    pub last_login: Option<DateTime<Utc>>,
    /// Account creation time.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub created_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// Whether this user's role holds `capability`.
    pub fn can(&self, capability: Capability) -> bool {
        self.role.allows(capability)
    }

    /// Up to two upper-cased initials of the display name.
    ///
    /// # Examples
    /// ```
    /// # use client::domain::User;
    /// # let user: User = serde_json::from_value(serde_json::json!({
    /// #     "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
    /// #     "name": "анна петрова",
    /// #     "email": "anna@example.com",
    /// #     "role": "Флорист",
    /// #     "created_at": "2025-01-01T00:00:00Z"
    /// # })).unwrap();
    /// assert_eq!(user.initials(), "АП");
    /// ```
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Decoding coverage for backend user payloads.
    use super::*;
    use crate::domain::Role;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw).expect_err("id must fail"), expected);
    }

    #[rstest]
    fn decodes_backend_user_response() {
        let user: User = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Administrator",
            "email": "admin@sls1.com",
            "role": "Администратор",
            "is_active": true,
            "created_at": "2025-03-01T10:00:00Z",
            "last_login": null
        }))
        .expect("user should decode");

        assert_eq!(user.role.role(), Some(Role::Administrator));
        assert!(user.can(Capability::ManageUsers));
        assert!(user.last_login.is_none());
        assert_eq!(user.initials(), "A");
    }

    #[rstest]
    fn missing_activity_flag_defaults_to_active() {
        let user: User = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Ольга Смирнова",
            "email": "olga@example.com",
            "role": "Куратор студии",
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .expect("user should decode");
        assert!(user.is_active);
        assert_eq!(user.initials(), "ОС");
    }
}
