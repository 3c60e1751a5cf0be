//! Caller-side view of one submitted job.

use scout_core::{Mode, ResearchJob};
use tokio::sync::watch;

/// One submission, as returned by
/// [`ResearchJobController::submit`](crate::ResearchJobController::submit).
///
/// Only sees its own job: after a reset or a newer submission the handle
/// keeps the last state it observed.
#[derive(Debug, Clone)]
pub struct JobHandle {
    id: Option<String>,
    mode: Mode,
    updates: watch::Receiver<ResearchJob>,
}

impl JobHandle {
    pub(crate) const fn new(
        id: Option<String>,
        mode: Mode,
        updates: watch::Receiver<ResearchJob>,
    ) -> Self {
        Self { id, mode, updates }
    }

    /// Backend job id. `None` for synchronous searches.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn current(&self) -> ResearchJob {
        self.updates.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResearchJob> {
        self.updates.clone()
    }

    /// Resolve at the first terminal state of this submission.
    ///
    /// If the job is reset or superseded first, returns the last state seen.
    pub async fn wait(&self) -> ResearchJob {
        let mut updates = self.updates.clone();
        if let Ok(job) = updates.wait_for(|job| job.status.is_terminal()).await {
            return job.clone();
        }
        updates.borrow().clone()
    }
}
