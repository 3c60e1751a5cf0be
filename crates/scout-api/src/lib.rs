//! # scout-api
//!
//! HTTP client for the research backend.
//!
//! Covers every route the client consumes:
//! - `POST /search`: synchronous search
//! - `POST /research/start`, `GET /research/{id}`, `GET /research/{id}/report`,
//!   `POST /research/{id}/stop`, `GET /research`: deep research jobs
//! - `GET /providers`, `GET /weather`, `GET /news`: catalog and ambient widgets
//!
//! The job controller only needs the four job calls; they are exposed through
//! the [`JobBackend`] trait so the controller can be driven by a scripted
//! backend in tests.

pub mod research;
pub mod search;
pub mod widgets;

mod error;
mod http;

pub use error::ApiError;
pub use research::{RemoteStatus, ResearchRecord, StartResearchRequest};
pub use search::SearchRequest;
pub use widgets::{NewsItem, Weather};

use std::future::Future;
use std::time::Duration;

use scout_config::ApiConfig;

// ── Backend seam ───────────────────────────────────────────────────

/// The job-related subset of the backend API.
pub trait JobBackend: Send + Sync + 'static {
    /// Run a synchronous search and return its results text.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Start a deep research job and return its id.
    fn start_research(
        &self,
        request: &StartResearchRequest,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Fetch the current record of a research job.
    fn research_status(
        &self,
        research_id: &str,
    ) -> impl Future<Output = Result<ResearchRecord, ApiError>> + Send;

    /// Fetch the final report. `Ok(None)` when the backend has no report text.
    fn research_report(
        &self,
        research_id: &str,
    ) -> impl Future<Output = Result<Option<String>, ApiError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    providers_timeout: Duration,
}

impl BackendClient {
    /// Create a client with default timeouts for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    /// Create a client from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .user_agent(concat!("scout/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            providers_timeout: Duration::from_secs(config.providers_timeout_secs),
        })
    }

    /// The normalized base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl JobBackend for BackendClient {
    async fn search(&self, request: &SearchRequest) -> Result<String, ApiError> {
        Self::search(self, request).await
    }

    async fn start_research(&self, request: &StartResearchRequest) -> Result<String, ApiError> {
        Self::start_research(self, request).await
    }

    async fn research_status(&self, research_id: &str) -> Result<ResearchRecord, ApiError> {
        Self::research_status(self, research_id).await
    }

    async fn research_report(&self, research_id: &str) -> Result<Option<String>, ApiError> {
        Self::research_report(self, research_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = BackendClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/search"), "http://localhost:5000/api/search");
        assert_eq!(
            client.url("research/abc/report"),
            "http://localhost:5000/api/research/abc/report"
        );
    }

    #[test]
    fn from_config_trims_base_url() {
        let config = ApiConfig {
            base_url: "  https://backend.example/api  ".into(),
            ..ApiConfig::default()
        };
        let client = BackendClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://backend.example/api");
        assert_eq!(client.providers_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn unreachable_backend_is_http_error() {
        // Port 9 (discard) on localhost is assumed closed.
        let client = BackendClient::new("http://127.0.0.1:9/api").unwrap();
        let err = client.weather().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }

    #[tokio::test]
    #[ignore] // requires a running backend on localhost:5000
    async fn live_catalog_and_widgets() {
        let client = BackendClient::new(scout_config::DEFAULT_BASE_URL).unwrap();
        let providers = client.providers().await.unwrap();
        println!("providers: {:?}", providers.keys().collect::<Vec<_>>());
        let weather = client.weather().await.unwrap();
        println!("weather: {weather:?}");
        let news = client.news(2).await.unwrap();
        assert!(news.len() <= 2);
    }
}
