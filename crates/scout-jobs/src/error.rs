//! Errors returned by [`ResearchJobController::submit`](crate::ResearchJobController::submit).

use scout_core::Mode;
use thiserror::Error;

/// Why a submission was refused or failed.
///
/// Every variant except [`Submission`](Self::Submission) is raised locally,
/// before any request reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("model must not be empty")]
    EmptyModel,

    /// The model cannot drive the requested mode. `suggested` is a model that can.
    #[error("model '{model}' does not support {mode} mode (try '{suggested}')")]
    UnsupportedModelForMode {
        model: String,
        mode: Mode,
        suggested: String,
    },

    /// Another job is still submitting or running on this controller.
    #[error("a job is already in flight; cancel or reset it first")]
    JobInFlight,

    /// The submission request itself failed. The job is now in `error`.
    #[error("{message}")]
    Submission { message: String },
}
