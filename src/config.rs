//! Client configuration for the admin backend connection.
//!
//! Holds the normalised base URL, the bearer token (already obtained by the
//! auth layer; token storage itself lives outside this crate) and the
//! request timeout.

use std::time::Duration;

/// Default timeout for API requests (30 seconds).
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable carrying the admin backend base URL.
const ENV_BASE_URL: &str = "TEAHOUSE_ADMIN_API_URL";
/// Environment variable carrying the operator's bearer token.
const ENV_TOKEN: &str = "TEAHOUSE_ADMIN_API_TOKEN";

/// Normalise the admin backend URL:
/// - ensure a scheme is present (https, or http for localhost)
/// - strip trailing slashes
/// - strip a trailing `/v1/admin` segment (operators often paste the full
///   API prefix; request paths carry it already)
pub fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    // Ensure scheme
    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }

    // Strip trailing slashes
    while url.ends_with('/') {
        url.pop();
    }

    // Strip trailing /v1/admin
    if url.ends_with("/v1/admin") {
        url.truncate(url.len() - "/v1/admin".len());
    }

    // Strip trailing slashes again (in case "/v1/admin/" was present)
    while url.ends_with('/') {
        url.pop();
    }

    url
}

/// Connection settings for [`crate::api::ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl ApiConfig {
    /// Build a config for the given backend URL (normalised on the way in).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read base URL and token from the environment.
    ///
    /// Returns `None` when `TEAHOUSE_ADMIN_API_URL` is unset or blank.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(ENV_BASE_URL).ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let mut config = Self::new(&base_url);
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.trim().is_empty() {
                config.bearer_token = Some(token.trim().to_string());
            }
        }
        Some(config)
    }

    /// Attach the operator's bearer token.
    pub fn with_token(mut self, token: &str) -> Self {
        self.bearer_token = Some(token.trim().to_string());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
