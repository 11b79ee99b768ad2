//! Client configuration loaded via OrthoConfig.
//!
//! Raw settings come from `STUDIO_*` environment variables and configuration
//! files; [`ClientSettings::resolve`] validates them into a [`ClientConfig`].

use std::path::PathBuf;
use std::time::Duration;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const FALLBACK_TOKEN_FILE: &str = ".studio-admin-token";

/// Raw configuration values for the admin client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDIO")]
pub struct ClientSettings {
    /// Backend origin, e.g. `http://localhost:8000`.
    pub base_url: Option<String>,
    /// File holding the persisted bearer token.
    pub token_path: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

/// Validated configuration used to wire the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin.
    pub base_url: Url,
    /// Token file location.
    pub token_path: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

/// Errors raised while validating client configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("invalid STUDIO_BASE_URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The base URL is not http(s).
    #[error("STUDIO_BASE_URL must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },
    /// A zero timeout would fail every request.
    #[error("STUDIO_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

impl ClientSettings {
    /// Validate raw settings, filling defaults from `env` where needed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use client::config::ClientSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string()
    ///     .returning(|name| (name == "HOME").then(|| "/home/anna".to_owned()));
    ///
    /// let settings = ClientSettings {
    ///     base_url: None,
    ///     token_path: None,
    ///     timeout_secs: None,
    ///     log_json: false,
    /// };
    /// let config = settings.resolve(&env)?;
    /// assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    /// assert_eq!(
    ///     config.token_path,
    ///     std::path::PathBuf::from("/home/anna/.config/studio-admin/token")
    /// );
    /// # Ok::<(), client::config::ConfigError>(())
    /// ```
    pub fn resolve<E: Env>(&self, env: &E) -> Result<ClientConfig, ConfigError> {
        let raw_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim();
        let base_url = Url::parse(raw_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: base_url.scheme().to_owned(),
            });
        }

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let token_path = self
            .token_path
            .clone()
            .unwrap_or_else(|| default_token_path(env));

        Ok(ClientConfig {
            base_url,
            token_path,
            timeout: Duration::from_secs(timeout_secs),
            log_json: self.log_json,
        })
    }
}

fn default_token_path<E: Env>(env: &E) -> PathBuf {
    match env.string("HOME") {
        Some(home) if !home.trim().is_empty() => PathBuf::from(home)
            .join(".config")
            .join("studio-admin")
            .join("token"),
        _ => PathBuf::from(".").join(FALLBACK_TOKEN_FILE),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration loading and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("studio-admin")])
            .expect("config should load")
    }

    fn env_with_home(home: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| match key {
                "HOME" => home.map(str::to_owned),
                _ => None,
            });
        env
    }

    fn settings(base_url: Option<&str>, timeout_secs: Option<u64>) -> ClientSettings {
        ClientSettings {
            base_url: base_url.map(str::to_owned),
            token_path: None,
            timeout_secs,
            log_json: false,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("STUDIO_BASE_URL", None::<String>),
            ("STUDIO_TOKEN_PATH", None::<String>),
            ("STUDIO_TIMEOUT_SECS", None::<String>),
            ("STUDIO_LOG_JSON", None::<String>),
        ]);

        let config = load_from_empty_args()
            .resolve(&env_with_home(Some("/home/anna")))
            .expect("defaults resolve");
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(
            config.token_path,
            PathBuf::from("/home/anna/.config/studio-admin/token")
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.log_json);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STUDIO_BASE_URL", Some("https://studio.example.com".to_owned())),
            ("STUDIO_TOKEN_PATH", Some("/tmp/studio-token".to_owned())),
            ("STUDIO_TIMEOUT_SECS", Some("5".to_owned())),
            ("STUDIO_LOG_JSON", Some("true".to_owned())),
        ]);

        let config = load_from_empty_args()
            .resolve(&env_with_home(None))
            .expect("overrides resolve");
        assert_eq!(config.base_url.as_str(), "https://studio.example.com/");
        assert_eq!(config.token_path, PathBuf::from("/tmp/studio-token"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.log_json);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    fn token_path_falls_back_to_working_directory(#[case] home: Option<&'static str>) {
        let config = settings(None, None)
            .resolve(&env_with_home(home))
            .expect("resolves");
        assert_eq!(config.token_path, PathBuf::from("./.studio-admin-token"));
    }

    #[rstest]
    fn malformed_base_url_is_rejected() {
        let err = settings(Some("not a url"), None)
            .resolve(&env_with_home(None))
            .expect_err("invalid url");
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn non_http_scheme_is_rejected() {
        let err = settings(Some("ftp://studio.example.com"), None)
            .resolve(&env_with_home(None))
            .expect_err("ftp rejected");
        assert!(matches!(err, ConfigError::UnsupportedScheme { scheme } if scheme == "ftp"));
    }

    #[rstest]
    fn zero_timeout_is_rejected() {
        let err = settings(None, Some(0))
            .resolve(&env_with_home(None))
            .expect_err("zero timeout");
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }
}
