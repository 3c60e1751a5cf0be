//! Mode, status and error-kind enums for Scout jobs.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `JobStatus` provides `allowed_next_states()` so the controller can enforce
//! valid transitions in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// How a query is executed by the backend.
///
/// `Search` completes within one HTTP round trip. `Research` starts a
/// long-running multi-step job whose report is retrieved by polling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Search,
    Research,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Research => "research",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(Self::Search),
            "research" | "deep" => Ok(Self::Research),
            other => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a research job.
///
/// ```text
/// idle → submitting → running → completed
///                             → error
///                             → cancelled
///                   → completed (synchronous search)
///                   → error
///                   → cancelled
/// ```
///
/// `completed`, `error` and `cancelled` are terminal. Only a reset (or a new
/// submission, which implies one) leaves them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Idle,
    Submitting,
    Running,
    Completed,
    Error,
    Cancelled,
}

impl JobStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Submitting],
            Self::Submitting => &[Self::Running, Self::Completed, Self::Error, Self::Cancelled],
            Self::Running => &[Self::Completed, Self::Error, Self::Cancelled],
            Self::Completed | Self::Error | Self::Cancelled => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Like [`can_transition_to`](Self::can_transition_to), but reports the
    /// rejected pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] when `next` is not reachable.
    pub fn check_transition(self, next: Self) -> Result<(), CoreError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error | Self::Cancelled)
    }

    /// A job is active while it still owns the controller (submitting or running).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Submitting | Self::Running)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Why a job ended in [`JobStatus::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The initial submission failed (transport or non-success response).
    SubmissionTransport,
    /// A status poll failed at the transport level.
    PollTransport,
    /// The backend explicitly reported the job as failed.
    BackendReported,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmissionTransport => "submission_transport",
            Self::PollTransport => "poll_transport",
            Self::BackendReported => "backend_reported",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ALL: [JobStatus; 6] = [
        JobStatus::Idle,
        JobStatus::Submitting,
        JobStatus::Running,
        JobStatus::Completed,
        JobStatus::Error,
        JobStatus::Cancelled,
    ];

    #[test]
    fn terminal_states_have_no_successors() {
        for status in ALL.iter().filter(|s| s.is_terminal()) {
            assert!(status.allowed_next_states().is_empty(), "{status}");
        }
    }

    #[test]
    fn running_is_only_reachable_from_submitting() {
        let sources: Vec<JobStatus> = ALL
            .iter()
            .copied()
            .filter(|s| s.can_transition_to(JobStatus::Running))
            .collect();
        assert_eq!(sources, vec![JobStatus::Submitting]);
    }

    #[test]
    fn idle_cannot_jump_to_running() {
        let err = JobStatus::Idle
            .check_transition(JobStatus::Running)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                from: "idle".into(),
                to: "running".into(),
            }
        );
    }

    #[test]
    fn cancel_allowed_only_while_active() {
        for status in ALL {
            assert_eq!(
                status.can_transition_to(JobStatus::Cancelled),
                status.is_active(),
                "{status}"
            );
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&JobStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let kind = serde_json::to_string(&ErrorKind::PollTransport).unwrap();
        assert_eq!(kind, "\"poll_transport\"");
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Research".parse::<Mode>().unwrap(), Mode::Research);
        assert_eq!(" search ".parse::<Mode>().unwrap(), Mode::Search);
        assert!(matches!(
            "browse".parse::<Mode>(),
            Err(CoreError::UnknownMode(m)) if m == "browse"
        ));
    }
}
