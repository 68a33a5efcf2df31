use crate::api::{ApiClient, ApiConfig};
use crate::features::auth::{AuthContext, FileSessionStore};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// File name used when no session path is configured.
const SESSION_FILE_NAME: &str = "session.json";

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub timeout: Duration,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            timeout: crate::api::DEFAULT_TIMEOUT,
            session_file: default_session_file(),
        }
    }

    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// # Errors
    /// Returns an error if the API URL is not a usable http(s) URL.
    pub fn api_config(&self) -> Result<ApiConfig> {
        Ok(ApiConfig::new(&self.api_url)
            .with_context(|| format!("invalid API URL: {}", self.api_url))?
            .with_timeout(self.timeout)
            .normalize())
    }

    /// Anonymous client, without any session attached.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    pub fn api_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.api_config()?)?)
    }

    /// Loads the persisted session.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be read or removed.
    pub fn auth_context(&self) -> Result<AuthContext<FileSessionStore>> {
        AuthContext::init(FileSessionStore::new(&self.session_file)).with_context(|| {
            format!(
                "failed to load session from {}",
                self.session_file.display()
            )
        })
    }

    /// Client carrying the persisted session's bearer token, if any.
    ///
    /// # Errors
    /// See [`Self::api_client`] and [`Self::auth_context`].
    pub fn authenticated_client(&self) -> Result<ApiClient> {
        let auth = self.auth_context()?;
        Ok(auth.api_client(self.api_client()?))
    }
}

/// `resetflow/session.json` under the platform config directory
/// (`$XDG_CONFIG_HOME` or `~/.config` on Linux, `%APPDATA%` on Windows), falling
/// back to the working directory.
#[must_use]
pub fn default_session_file() -> PathBuf {
    match dirs::config_dir() {
        Some(base) => base.join(env!("CARGO_PKG_NAME")).join(SESSION_FILE_NAME),
        None => PathBuf::from(format!(".{}-{SESSION_FILE_NAME}", env!("CARGO_PKG_NAME"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new("http://localhost:8082".to_string())
            .with_timeout_seconds(5)
            .with_session_file("/tmp/session.json");
        assert_eq!(args.api_url, "http://localhost:8082");
        assert_eq!(args.timeout, Duration::from_secs(5));
        assert_eq!(args.session_file, PathBuf::from("/tmp/session.json"));
    }

    #[test]
    fn test_api_config_rejects_bad_url() {
        let args = GlobalArgs::new("localhost".to_string());
        assert!(args.api_config().is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_default_session_file_prefers_xdg() {
        temp_env::with_vars(
            [
                ("XDG_CONFIG_HOME", Some("/xdg")),
                ("HOME", Some("/home/user")),
            ],
            || {
                assert_eq!(
                    default_session_file(),
                    PathBuf::from("/xdg/resetflow/session.json")
                );
            },
        );
        temp_env::with_vars(
            [
                ("XDG_CONFIG_HOME", None::<&str>),
                ("HOME", Some("/home/user")),
            ],
            || {
                assert_eq!(
                    default_session_file(),
                    PathBuf::from("/home/user/.config/resetflow/session.json")
                );
            },
        );
    }

    #[test]
    fn test_default_session_file_uses_platform_config_dir() {
        temp_env::with_var_unset("XDG_CONFIG_HOME", || {
            if let Some(base) = dirs::config_dir() {
                assert_eq!(
                    default_session_file(),
                    base.join("resetflow").join("session.json")
                );
            }
        });
    }
}
