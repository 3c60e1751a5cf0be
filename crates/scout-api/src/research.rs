//! Deep research job routes.

use scout_config::ResearchConfig;
use scout_core::{JobOptions, determine_provider};
use serde::{Deserialize, Serialize};

use crate::http::{ensure_success, read_json};
use crate::{ApiError, BackendClient};

/// Body of `POST /research/start`.
///
/// `deep` and `vision` are always on; the exploration budget comes from the
/// `[research]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartResearchRequest {
    pub query: String,
    pub model: String,
    pub provider: String,
    pub deep: bool,
    pub vision: bool,
    pub planner: bool,
    pub max_steps: u32,
    pub max_search_iterations: u32,
    pub max_query_num: u32,
    pub headless: bool,
}

impl StartResearchRequest {
    #[must_use]
    pub fn new(query: &str, model: &str, options: JobOptions, budget: ResearchConfig) -> Self {
        Self {
            query: query.to_string(),
            model: model.to_string(),
            provider: determine_provider(model).to_string(),
            deep: true,
            vision: true,
            planner: options.use_planner,
            max_steps: budget.max_steps,
            max_search_iterations: budget.max_search_iterations,
            max_query_num: budget.max_query_num,
            headless: options.headless,
        }
    }
}

/// Job status as reported by the backend.
///
/// Only `completed` and `error` end a job; every other value (including
/// `stopping`/`stopped` and values this client does not know) means the job
/// is still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteStatus {
    Running,
    Completed,
    Error,
    Other(String),
}

impl From<String> for RemoteStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "running" => Self::Running,
            "completed" => Self::Completed,
            "error" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<RemoteStatus> for String {
    fn from(value: RemoteStatus) -> Self {
        match value {
            RemoteStatus::Running => "running".into(),
            RemoteStatus::Completed => "completed".into(),
            RemoteStatus::Error => "error".into(),
            RemoteStatus::Other(other) => other,
        }
    }
}

/// A research job record as returned by `GET /research/{id}` and `GET /research`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub status: RemoteStatus,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ResearchRecord {
    /// The backend's explanation for a failed job, if it gave one.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|m| !m.is_empty())
    }
}

#[derive(Deserialize)]
struct StartResponse {
    status: String,
    #[serde(default)]
    research_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ReportResponse {
    status: String,
    #[serde(default)]
    report: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct StopResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

impl BackendClient {
    fn research_url(&self, research_id: &str, suffix: &str) -> String {
        self.url(&format!(
            "research/{}{suffix}",
            urlencoding::encode(research_id)
        ))
    }

    /// Start a deep research job and return the backend-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the envelope is not a
    /// success, or no `research_id` is present.
    pub async fn start_research(&self, request: &StartResearchRequest) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url("research/start"))
            .json(request)
            .send()
            .await?;
        let data: StartResponse = read_json(resp).await?;
        ensure_success(&data.status, data.message)?;
        data.research_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Parse("start response has no 'research_id'".into()))
    }

    /// Fetch the current record of a research job.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the job is unknown (404),
    /// or the record cannot be parsed.
    pub async fn research_status(&self, research_id: &str) -> Result<ResearchRecord, ApiError> {
        let resp = self
            .http
            .get(self.research_url(research_id, ""))
            .send()
            .await?;
        read_json(resp).await
    }

    /// Fetch the final markdown report of a completed job.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend refuses
    /// (e.g. the job has not completed yet).
    pub async fn research_report(&self, research_id: &str) -> Result<Option<String>, ApiError> {
        let resp = self
            .http
            .get(self.research_url(research_id, "/report"))
            .send()
            .await?;
        let data: ReportResponse = read_json(resp).await?;
        ensure_success(&data.status, data.message)?;
        Ok(data.report.filter(|r| !r.trim().is_empty()))
    }

    /// Ask the backend to stop a running job. Returns the backend's message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the backend cannot stop the job.
    pub async fn stop_research(&self, research_id: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.research_url(research_id, "/stop"))
            .send()
            .await?;
        let data: StopResponse = read_json(resp).await?;
        ensure_success(&data.status, data.message.clone())?;
        Ok(data.message.unwrap_or_default())
    }

    /// List every job the backend knows about.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the list cannot be parsed.
    pub async fn list_research(&self) -> Result<Vec<ResearchRecord>, ApiError> {
        let resp = self.http.get(self.url("research")).send().await?;
        read_json(resp).await
    }
}
