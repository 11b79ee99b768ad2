//! Authentication primitives such as login credentials and bearer tokens.
//!
//! Keep user input parsing outside the session store by exposing constructors
//! that validate string inputs before anything talks to a port.

use std::fmt;

use zeroize::Zeroizing;

use super::role::Role;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// E-mail was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials sent to `POST /api/auth/login`.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@sls1.com ", "admin123").unwrap();
/// assert_eq!(creds.email(), "admin@sls1.com");
/// assert_eq!(creds.password(), "admin123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// E-mail used as the login name.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token issued by the backend.
///
/// The value is zeroed on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a raw token, rejecting blank values.
    ///
    /// # Examples
    /// ```
    /// use client::domain::AccessToken;
    ///
    /// assert!(AccessToken::new("  ").is_none());
    /// let token = AccessToken::new("eyJhbGciOi").unwrap();
    /// assert_eq!(token.expose(), "eyJhbGciOi");
    /// ```
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token text for the `Authorization` header or persistence.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Header value in `Bearer <token>` form.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Errors raised while validating a registration form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Name was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Credentials were invalid.
    #[error(transparent)]
    Credentials(#[from] LoginValidationError),
}

/// New account submitted to `POST /api/auth/register` (admin only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    credentials: LoginCredentials,
    role: Role,
}

impl Registration {
    /// Validate a registration form.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Self, RegistrationValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrationValidationError::EmptyName);
        }
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        Ok(Self {
            name: name.to_owned(),
            credentials,
            role,
        })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login credentials for the new account.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Role granted to the new account.
    pub fn role(&self) -> Role {
        self.role
    }
}
