//! Synchronous search (`POST /search`).

use scout_core::{JobOptions, Mode};
use serde::{Deserialize, Serialize};

use crate::http::{ensure_success, read_json};
use crate::{ApiError, BackendClient};

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub model: String,
    pub mode: Mode,
    pub headless: bool,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: &str, model: &str, options: JobOptions) -> Self {
        Self {
            query: query.to_string(),
            model: model.to_string(),
            mode: Mode::Search,
            headless: options.headless,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    results: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl BackendClient {
    /// Run a search that completes within this request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the backend answers with a
    /// non-success status or envelope, or `results` is missing.
    pub async fn search(&self, request: &SearchRequest) -> Result<String, ApiError> {
        let resp = self.http.post(self.url("search")).json(request).send().await?;
        let data: SearchResponse = read_json(resp).await?;
        ensure_success(&data.status, data.message)?;
        data.results
            .ok_or_else(|| ApiError::Parse("search response has no 'results'".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_body_matches_contract() {
        let request = SearchRequest::new(
            "tokio vs async-std",
            "gpt-4o",
            JobOptions {
                use_planner: true,
                headless: false,
            },
        );
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "query": "tokio vs async-std",
                "model": "gpt-4o",
                "mode": "search",
                "headless": false,
            })
        );
    }

    #[test]
    fn parses_backend_search_response() {
        let fixture = r#"{
            "status": "success",
            "query": "rust",
            "mode": "search",
            "model": "gemini-2.0-flash",
            "results": "Results for: rust"
        }"#;
        let data: SearchResponse = serde_json::from_str(fixture).unwrap();
        assert_eq!(data.status, "success");
        assert_eq!(data.results.as_deref(), Some("Results for: rust"));
    }
}
