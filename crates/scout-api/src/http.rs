//! Shared HTTP response helpers for backend calls.
//!
//! Centralizes status-code checks and the backend's
//! `{status: "success" | "error", message?}` envelope so endpoint modules
//! stay focused on request construction and response mapping.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Value of the envelope `status` field on success.
pub const SUCCESS: &str = "success";

/// Error body shape shared by every backend route.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise the body is read and
/// its `message` (or `error`) field becomes [`ApiError::Api::message`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status, body = %body, "backend returned non-success status");
    Err(ApiError::Api {
        status,
        message: structured_message(&body),
    })
}

/// Extract `message`, falling back to `error`, from a JSON error body.
fn structured_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

/// Decode a checked response body as JSON.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let bytes = check_response(resp).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Reject an envelope whose `status` is not [`SUCCESS`].
pub fn ensure_success(status: &str, message: Option<String>) -> Result<(), ApiError> {
    if status == SUCCESS {
        Ok(())
    } else {
        Err(ApiError::Rejected { message })
    }
}
