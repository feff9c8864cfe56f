//! Shared HTTP client and error mapping.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::error::ForgeError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Build headers for a Google API-key request.
pub fn api_key_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(api_key) {
        headers.insert("x-goog-api-key", val);
    }
    headers
}

/// Map a non-success HTTP status and body to an error.
pub fn status_to_error(status: u16, body: &str) -> ForgeError {
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
    if has_error_reason(body, "API_KEY_INVALID") {
        return ForgeError::Authentication(message);
    }
    match status {
        401 | 403 => ForgeError::Authentication(message),
        429 => ForgeError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ForgeError::api(status, message),
    }
}

/// Pull `error.message` out of a Google API error envelope.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Whether any `ErrorInfo` detail carries `reason`.
///
/// Gemini reports a bad API key as 400 `INVALID_ARGUMENT` with reason
/// `API_KEY_INVALID`, not as 401.
fn has_error_reason(body: &str, reason: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.get("details")?.as_array().cloned())
        .is_some_and(|details| {
            details
                .iter()
                .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some(reason))
        })
}

/// Read the `RetryInfo.retryDelay` detail (e.g. `"7s"`, `"0.5s"`).
fn extract_retry_after(body: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("details")?
        .as_array()?
        .iter()
        .filter_map(|d| d.get("retryDelay").and_then(|r| r.as_str()))
        .find_map(|delay| delay.strip_suffix('s')?.parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64)
}
