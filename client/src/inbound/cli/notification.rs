//! Toast-style notices printed after each command.

use std::fmt;

use crate::domain::Error;

/// Generic failure title.
pub const ERROR_TITLE: &str = "Ошибка";
/// Generic success title.
pub const SUCCESS_TITLE: &str = "Успешно";

/// Outcome flavour of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The action succeeded.
    Success,
    /// The action failed.
    Failure,
}

/// One-line notice shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    kind: NotificationKind,
    title: String,
    description: Option<String>,
}

impl Notification {
    /// Success notice with a title only.
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: None,
        }
    }

    /// Failure notice with a title only.
    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            description: None,
        }
    }

    /// Failure for `error`, using `fallback` when the backend gave no detail.
    ///
    /// # Examples
    /// ```
    /// use client::domain::Error;
    /// use client::inbound::cli::Notification;
    ///
    /// let generic = Error::unexpected("");
    /// assert_eq!(
    ///     Notification::from_error(&generic, "Не удалось удалить предмет").to_string(),
    ///     "[error] Ошибка: Не удалось удалить предмет"
    /// );
    /// let detailed = Error::conflict("Project was modified");
    /// assert_eq!(
    ///     Notification::from_error(&detailed, "ignored").to_string(),
    ///     "[error] Ошибка: Project was modified"
    /// );
    /// ```
    pub fn from_error(error: &Error, fallback: &str) -> Self {
        let generic = error.message() == error.code().fallback_message();
        let message = if generic && !fallback.is_empty() {
            fallback
        } else {
            error.message()
        };
        Self::failure(ERROR_TITLE).with_description(message)
    }

    /// Attach a description; blank text is ignored.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    /// Outcome flavour.
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Headline.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Detail line, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Failure => "error",
        };
        match &self.description {
            Some(description) => write!(f, "[{tag}] {}: {description}", self.title),
            None => write!(f, "[{tag}] {}", self.title),
        }
    }
}
