//! Admin backend API client.
//!
//! Authenticated HTTP/JSON plumbing shared by the order screen and the
//! catalog picker: request building, the error taxonomy, and extraction of
//! a displayable message from whatever error body the backend returns.
//!
//! Every response is a complete, authoritative snapshot; callers replace
//! their cached state wholesale and never merge partial updates.

use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failure modes of a backend call.
///
/// Every variant carries a message fit for direct operator display. Callers
/// surface it and leave their local working state untouched; nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure: unreachable host, timeout, TLS.
    #[error("{0}")]
    Transport(String),
    /// Non-2xx response, with the best displayable message the body offered.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A 2xx response whose body could not be decoded as the expected type.
    #[error("Invalid response from admin backend: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convert a `reqwest::Error` into a user-friendly message.
fn friendly_error(url: &str, err: &reqwest::Error) -> String {
    if err.is_connect() {
        return format!("Cannot reach admin backend at {url}");
    }
    if err.is_timeout() {
        return format!("Connection to {url} timed out");
    }
    if err.is_builder() {
        return format!("Invalid admin backend URL: {url}");
    }
    format!("Network error communicating with {url}: {err}")
}

/// Convert an HTTP status code into a user-friendly fallback message.
fn status_error(status: StatusCode) -> String {
    match status.as_u16() {
        401 => "Session expired, sign in again".to_string(),
        403 => "Not authorized for this operation".to_string(),
        404 => "Not found on the admin backend".to_string(),
        s if s >= 500 => format!("Admin backend server error (HTTP {s})"),
        s => format!("Unexpected response from admin backend (HTTP {s})"),
    }
}

/// Extract a displayable message from an error body.
///
/// Recognises the backend's `detail` key as either a plain string or a
/// validation list (`[{msg, ...}]`, joined with commas), then a plain
/// `message` key. Any shape we don't recognise falls back to the generic
/// per-status message.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = json.get("detail") {
            if let Some(text) = detail.as_str() {
                let text = text.trim();
                if !text.is_empty() {
                    return text.to_string();
                }
            }
            if let Some(entries) = detail.as_array() {
                let msgs: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join(", ");
                }
            }
        }
        if let Some(text) = json.get("message").and_then(Value::as_str) {
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    status_error(status)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Authenticated client for the admin backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Perform an authenticated request.
    ///
    /// `path` includes the leading slash, e.g. `/v1/admin/orders/{id}`.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        self.request_with_query(method, path, &[], body).await
    }

    /// Like [`ApiClient::request`] with query-string pairs appended.
    pub(crate) async fn request_with_query<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.config.base_url(), path);

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = self.config.bearer_token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        debug!(method = %method, path = %path, "admin backend request");

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(friendly_error(self.config.base_url(), &e)))?;
        let status = resp.status();
        let body_text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = extract_error_message(status, &body_text);
            warn!(
                status = status.as_u16(),
                path = %path,
                message = %message,
                "admin backend rejected request"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body_text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
