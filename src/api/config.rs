//! Connection settings for the backend API. Values are public; secrets such as
//! session tokens are attached per client and never stored here.

use super::errors::ApiError;
use std::time::Duration;
use url::Url;

/// Backend used by the reference deployment when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8082";
/// Upper bound for a single request, including the reset service calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl ApiConfig {
    /// Parses the base URL and applies the default timeout and user agent.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the URL cannot be parsed, has no host, or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: crate::APP_USER_AGENT.to_string(),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replaces unusable values with defaults: a zero timeout would fail every call.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = crate::APP_USER_AGENT.to_string();
        }
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Joins the base URL and an API path, tolerating stray slashes on either side.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        build_url_with_base(self.base_url.as_str(), path)
    }
}

fn parse_base_url(value: &str) -> Result<Url, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config("API base URL is required.".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ApiError::Config(format!(
                "Unsupported scheme {scheme} in API base URL"
            )))
        }
    }

    if url.host().is_none() {
        return Err(ApiError::Config(
            "API base URL has no host specified".to_string(),
        ));
    }

    Ok(url)
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
