use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ErrorKind, JobStatus, Mode};
use crate::providers::determine_provider;

/// Caller-supplied flags forwarded verbatim to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOptions {
    /// Let the backend plan research steps before browsing.
    pub use_planner: bool,
    /// Run the backend browser without a visible window.
    pub headless: bool,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            use_planner: true,
            headless: true,
        }
    }
}

/// The single job tracked by a controller.
///
/// `result` is only present when `status` is `completed`; `error_message` and
/// `error_kind` only when it is `error`. `report_error` marks a completed job
/// whose report could not be retrieved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchJob {
    pub id: Option<String>,
    pub mode: Mode,
    pub query: String,
    pub model: String,
    pub provider: String,
    pub options: JobOptions,
    pub status: JobStatus,
    pub result: Option<String>,
    pub error_message: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub report_error: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ResearchJob {
    /// A fresh job in `submitting` with the provider derived from `model`.
    #[must_use]
    pub fn submitting(query: &str, model: &str, mode: Mode, options: JobOptions) -> Self {
        let model = model.trim();
        Self {
            id: None,
            mode,
            query: query.trim().to_string(),
            model: model.to_string(),
            provider: determine_provider(model).to_string(),
            options,
            status: JobStatus::Submitting,
            result: None,
            error_message: None,
            error_kind: None,
            report_error: None,
            submitted_at: Some(Utc::now()),
            finished_at: None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == JobStatus::Idle
    }

    /// Seconds between submission and the terminal transition, if both happened.
    #[must_use]
    pub fn elapsed_secs(&self) -> Option<i64> {
        match (self.submitted_at, self.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}
