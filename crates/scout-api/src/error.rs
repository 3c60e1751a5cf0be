//! Backend API error types.

use thiserror::Error;

/// Errors that can occur when talking to the research backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (connection refused, timeout, TLS, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// The structured `message`/`error` field of the body, if any.
        message: Option<String>,
    },

    /// A 2xx response whose envelope `status` was not `"success"`.
    #[error("backend rejected the request: {}", message.as_deref().unwrap_or("no details"))]
    Rejected {
        /// The envelope's `message` field, if any.
        message: Option<String>,
    },

    /// Failed to interpret a backend response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The message the backend itself supplied, when it supplied one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Rejected { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}
