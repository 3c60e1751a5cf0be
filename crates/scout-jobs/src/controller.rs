//! The single-job lifecycle state machine.
//!
//! All state lives in one [`Slot`] behind a `std::sync::Mutex` that is never
//! held across an await. Every change goes through [`Shared::apply`], which
//! validates the transition, drops events from superseded submissions, starts
//! or stops the poll task, and publishes the new snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use scout_api::{ApiError, JobBackend, RemoteStatus, SearchRequest, StartResearchRequest};
use scout_config::{PollingConfig, ResearchConfig, ScoutConfig};
use scout_core::{
    CoreError, DEFAULT_RESEARCH_MODEL, ErrorKind, JobOptions, JobStatus, Mode, ResearchJob,
    is_research_capable,
};
use tokio::sync::watch;

use crate::error::SubmitError;
use crate::handle::JobHandle;
use crate::poller::Poller;

/// Message used when a failed submission carries no usable detail.
pub const SUBMIT_FAILURE: &str = "An error occurred while performing the search.";

const POLL_FAILURE: &str = "Failed to check the research status.";
const BACKEND_FAILURE: &str = "The research job failed without an error message.";
const REPORT_MISSING: &str = "report unavailable: the backend returned no report";

// ── Inputs ─────────────────────────────────────────────────────────

/// Controller tuning taken from [`ScoutConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Fixed delay between status polls. The first poll fires one interval
    /// after the backend acknowledges the job.
    pub poll_interval: Duration,
    /// Exploration budget sent with every research start.
    pub research: ResearchConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: PollingConfig::default().interval(),
            research: ResearchConfig::default(),
        }
    }
}

impl ControllerConfig {
    #[must_use]
    pub const fn from_config(config: &ScoutConfig) -> Self {
        Self {
            poll_interval: config.polling.interval(),
            research: config.research,
        }
    }
}

/// What the caller wants run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub query: String,
    pub model: String,
    pub mode: Mode,
    pub options: JobOptions,
}

impl SubmitRequest {
    pub fn new(query: impl Into<String>, model: impl Into<String>, mode: Mode) -> Self {
        Self {
            query: query.into(),
            model: model.into(),
            mode,
            options: JobOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: JobOptions) -> Self {
        self.options = options;
        self
    }
}

// ── State ──────────────────────────────────────────────────────────

/// Everything that can change a job.
pub(crate) enum JobEvent {
    Begin {
        job: ResearchJob,
        watcher: watch::Sender<ResearchJob>,
    },
    Acknowledged {
        id: String,
    },
    SearchCompleted {
        result: String,
    },
    /// A poll saw `completed`; the report fetch is about to start.
    ReportPending,
    /// `Err` carries the "report unavailable" reason.
    ReportFetched(Result<String, String>),
    Failed {
        kind: ErrorKind,
        message: String,
    },
    Cancel,
    Reset,
}

impl JobEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::Begin { .. } => "begin",
            Self::Acknowledged { .. } => "acknowledged",
            Self::SearchCompleted { .. } => "search_completed",
            Self::ReportPending => "report_pending",
            Self::ReportFetched(_) => "report_fetched",
            Self::Failed { .. } => "failed",
            Self::Cancel => "cancel",
            Self::Reset => "reset",
        }
    }

    const fn target(&self) -> JobStatus {
        match self {
            Self::Begin { .. } => JobStatus::Submitting,
            Self::Acknowledged { .. } | Self::ReportPending => JobStatus::Running,
            Self::SearchCompleted { .. } | Self::ReportFetched(_) => JobStatus::Completed,
            Self::Failed { .. } => JobStatus::Error,
            Self::Cancel => JobStatus::Cancelled,
            Self::Reset => JobStatus::Idle,
        }
    }
}

#[derive(Default)]
struct Slot {
    job: ResearchJob,
    /// Bumped by every submission, cancel and reset. Events stamped with an
    /// older value are dropped.
    generation: u64,
    report_pending: bool,
    poller: Option<Poller>,
    /// Per-submission channel behind [`JobHandle`].
    watcher: Option<watch::Sender<ResearchJob>>,
}

impl Slot {
    fn halt_poller(&mut self, abort: bool) {
        if let Some(poller) = self.poller.take() {
            if abort {
                poller.abort();
            } else {
                poller.stop();
            }
        }
    }

    fn finish(&mut self, status: JobStatus) {
        self.job.status = status;
        self.job.finished_at = Some(Utc::now());
    }
}

pub(crate) struct Shared<B> {
    backend: B,
    config: ControllerConfig,
    slot: Mutex<Slot>,
    state: watch::Sender<ResearchJob>,
    poll_gate: tokio::sync::Mutex<()>,
}

impl<B: JobBackend> Shared<B> {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Apply `event` to the job.
    ///
    /// `stamp` is the generation the event belongs to; `None` targets whatever
    /// job is current (user-initiated cancel and reset, or a new submission).
    /// Returns the generation after the change, or `None` if the event was
    /// ignored.
    fn apply(self: &Arc<Self>, stamp: Option<u64>, event: JobEvent) -> Option<u64> {
        let mut slot = self.lock();
        if let Some(generation) = stamp
            && generation != slot.generation
        {
            tracing::debug!(
                generation,
                current = slot.generation,
                event = event.name(),
                "ignoring event from a superseded job"
            );
            return None;
        }

        let from = slot.job.status;
        let to = event.target();
        let rejected = || CoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        };
        let verdict = match &event {
            JobEvent::Begin { .. } if from.is_active() => Err(rejected()),
            JobEvent::Begin { .. } | JobEvent::Reset => Ok(()),
            JobEvent::ReportPending if from != JobStatus::Running || slot.report_pending => {
                Err(rejected())
            }
            JobEvent::ReportPending => Ok(()),
            JobEvent::ReportFetched(_) if !slot.report_pending => Err(rejected()),
            _ => from.check_transition(to),
        };
        if let Err(error) = verdict {
            tracing::debug!(%error, event = event.name(), "transition rejected");
            return None;
        }

        match event {
            JobEvent::Begin { job, watcher } => {
                slot.halt_poller(true);
                slot.generation += 1;
                slot.report_pending = false;
                slot.job = job;
                slot.watcher = Some(watcher);
            }
            JobEvent::Acknowledged { id } => {
                slot.job.id = Some(id);
                slot.job.status = JobStatus::Running;
                slot.poller = Some(Poller::spawn(
                    Arc::downgrade(self),
                    slot.generation,
                    self.config.poll_interval,
                ));
            }
            JobEvent::SearchCompleted { result } => {
                slot.job.result = Some(result);
                slot.finish(JobStatus::Completed);
            }
            JobEvent::ReportPending => {
                // The report is fetched on the current task; only end the timer.
                slot.report_pending = true;
                slot.halt_poller(false);
            }
            JobEvent::ReportFetched(report) => {
                slot.report_pending = false;
                match report {
                    Ok(text) => slot.job.result = Some(text),
                    Err(reason) => slot.job.report_error = Some(reason),
                }
                slot.finish(JobStatus::Completed);
            }
            JobEvent::Failed { kind, message } => {
                slot.halt_poller(false);
                slot.job.error_message = Some(message);
                slot.job.error_kind = Some(kind);
                slot.finish(JobStatus::Error);
            }
            JobEvent::Cancel => {
                slot.halt_poller(true);
                slot.generation += 1;
                slot.report_pending = false;
                slot.finish(JobStatus::Cancelled);
                if let Some(research_id) = &slot.job.id {
                    tracing::warn!(
                        %research_id,
                        "job cancelled locally; the backend may keep running it"
                    );
                }
            }
            JobEvent::Reset => {
                slot.halt_poller(true);
                slot.generation += 1;
                slot.report_pending = false;
                slot.job = ResearchJob::default();
                slot.watcher = None;
            }
        }

        tracing::debug!(
            %from,
            to = %slot.job.status,
            generation = slot.generation,
            "job state changed"
        );
        self.publish(&slot);
        Some(slot.generation)
    }

    fn publish(&self, slot: &Slot) {
        self.state.send_replace(slot.job.clone());
        if let Some(watcher) = &slot.watcher {
            watcher.send_replace(slot.job.clone());
        }
    }

    /// The id to poll, if `generation` is current, running and not already
    /// fetching its report.
    fn pollable(&self, generation: u64) -> Option<String> {
        let slot = self.lock();
        if slot.generation != generation
            || slot.job.status != JobStatus::Running
            || slot.report_pending
        {
            return None;
        }
        slot.job.id.clone()
    }

    /// One status check. Serialized by the poll gate so a manual poll and a
    /// timer tick can never both see `completed`.
    pub(crate) async fn poll_once(self: &Arc<Self>, generation: u64) {
        let _gate = self.poll_gate.lock().await;
        let Some(research_id) = self.pollable(generation) else {
            return;
        };

        tracing::debug!(%research_id, "polling research status");
        match self.backend.research_status(&research_id).await {
            Ok(record) => match &record.status {
                RemoteStatus::Completed => self.fetch_report(generation, &research_id).await,
                RemoteStatus::Error => {
                    let message = record
                        .failure_message()
                        .unwrap_or(BACKEND_FAILURE)
                        .to_string();
                    tracing::warn!(%research_id, %message, "backend reported research failure");
                    self.apply(
                        Some(generation),
                        JobEvent::Failed {
                            kind: ErrorKind::BackendReported,
                            message,
                        },
                    );
                }
                RemoteStatus::Running | RemoteStatus::Other(_) => {
                    tracing::trace!(%research_id, status = ?record.status, "still in progress");
                }
            },
            Err(error) => {
                tracing::warn!(%research_id, %error, "research status poll failed");
                self.apply(
                    Some(generation),
                    JobEvent::Failed {
                        kind: ErrorKind::PollTransport,
                        message: describe(&error, POLL_FAILURE),
                    },
                );
            }
        }
    }

    async fn fetch_report(self: &Arc<Self>, generation: u64, research_id: &str) {
        if self.apply(Some(generation), JobEvent::ReportPending).is_none() {
            return;
        }
        let report = match self.backend.research_report(research_id).await {
            Ok(Some(report)) => Ok(report),
            Ok(None) => Err(REPORT_MISSING.to_string()),
            Err(error) => {
                tracing::warn!(%research_id, %error, "report fetch failed");
                Err(format!("report unavailable: {error}"))
            }
        };
        self.apply(Some(generation), JobEvent::ReportFetched(report));
    }
}

/// Pick the most specific message an [`ApiError`] offers.
fn describe(error: &ApiError, fallback: &str) -> String {
    if let Some(message) = error.backend_message() {
        return message.to_string();
    }
    let generic = error.to_string();
    if generic.trim().is_empty() {
        fallback.to_string()
    } else {
        generic
    }
}

// ── Controller ─────────────────────────────────────────────────────

/// Owns the lifecycle of one search or deep research job at a time.
///
/// Cheap to clone; clones share the same job.
pub struct ResearchJobController<B> {
    shared: Arc<Shared<B>>,
}

impl<B> Clone for ResearchJobController<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: JobBackend> ResearchJobController<B> {
    #[must_use]
    pub fn new(backend: B, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(ResearchJob::default());
        Self {
            shared: Arc::new(Shared {
                backend,
                config,
                slot: Mutex::new(Slot::default()),
                state,
                poll_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Snapshot of the current job.
    #[must_use]
    pub fn current(&self) -> ResearchJob {
        self.shared.state.borrow().clone()
    }

    /// Receive every published state change of this controller, across jobs.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResearchJob> {
        self.shared.state.subscribe()
    }

    /// Submit a query.
    ///
    /// Validation happens before any request is sent. On success the job is
    /// `running` (research, polled in the background) or already `completed`
    /// (search). A terminal job left from an earlier submission is replaced.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::EmptyQuery`] / [`SubmitError::EmptyModel`] for blank input.
    /// - [`SubmitError::UnsupportedModelForMode`] when a research job names a
    ///   model outside [`scout_core::RESEARCH_MODELS`].
    /// - [`SubmitError::JobInFlight`] while another job is submitting or running.
    /// - [`SubmitError::Submission`] when the backend request fails; the job
    ///   is left in `error`. If the job was cancelled or reset while the
    ///   request was in flight, a handle showing that state is returned instead.
    pub async fn submit(&self, request: SubmitRequest) -> Result<JobHandle, SubmitError> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SubmitError::EmptyQuery);
        }
        let model = request.model.trim();
        if model.is_empty() {
            return Err(SubmitError::EmptyModel);
        }
        if request.mode == Mode::Research && !is_research_capable(model) {
            return Err(SubmitError::UnsupportedModelForMode {
                model: model.to_string(),
                mode: request.mode,
                suggested: DEFAULT_RESEARCH_MODEL.to_string(),
            });
        }

        let job = ResearchJob::submitting(query, model, request.mode, request.options);
        let provider = job.provider.clone();
        let (watcher, updates) = watch::channel(job.clone());
        let Some(generation) = self.shared.apply(None, JobEvent::Begin { job, watcher }) else {
            return Err(SubmitError::JobInFlight);
        };
        tracing::info!(mode = %request.mode, model, %provider, generation, "submitting job");

        let outcome = match request.mode {
            Mode::Search => self
                .shared
                .backend
                .search(&SearchRequest::new(query, model, request.options))
                .await
                .map(|result| JobEvent::SearchCompleted { result }),
            Mode::Research => {
                let start = StartResearchRequest::new(
                    query,
                    model,
                    request.options,
                    self.shared.config.research,
                );
                self.shared
                    .backend
                    .start_research(&start)
                    .await
                    .map(|id| JobEvent::Acknowledged { id })
            }
        };

        match outcome {
            Ok(event) => {
                let id = match &event {
                    JobEvent::Acknowledged { id } => Some(id.clone()),
                    _ => None,
                };
                if self.shared.apply(Some(generation), event).is_none()
                    && let Some(research_id) = &id
                {
                    tracing::warn!(
                        %research_id,
                        "job was cancelled while starting; the backend job is orphaned"
                    );
                }
                Ok(JobHandle::new(id, request.mode, updates))
            }
            Err(error) => {
                let message = describe(&error, SUBMIT_FAILURE);
                tracing::warn!(%error, "submission failed");
                let failed = JobEvent::Failed {
                    kind: ErrorKind::SubmissionTransport,
                    message: message.clone(),
                };
                if self.shared.apply(Some(generation), failed).is_none() {
                    // Cancelled or reset while the request was in flight; the
                    // handle reports that state instead of the failure.
                    return Ok(JobHandle::new(None, request.mode, updates));
                }
                Err(SubmitError::Submission { message })
            }
        }
    }

    /// Check the job status once, outside the timer.
    ///
    /// No-op (and no request) unless a research job is `running` and its
    /// report is not already being fetched.
    pub async fn poll(&self) {
        let generation = self.shared.generation();
        self.shared.poll_once(generation).await;
    }

    /// Stop tracking the current job. Returns `false` if nothing was active.
    ///
    /// Local only: the backend is not told to stop.
    pub fn cancel(&self) -> bool {
        self.shared.apply(None, JobEvent::Cancel).is_some()
    }

    /// Forget the current job and return to `idle`. Valid in any state.
    pub fn reset(&self) {
        self.shared.apply(None, JobEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn describe_prefers_backend_message() {
        let error = ApiError::Api {
            status: 500,
            message: Some("Failed to start research: no key".into()),
        };
        assert_eq!(
            describe(&error, SUBMIT_FAILURE),
            "Failed to start research: no key"
        );
    }

    #[test]
    fn describe_falls_back_to_display() {
        let error = ApiError::Api {
            status: 502,
            message: None,
        };
        assert_eq!(describe(&error, SUBMIT_FAILURE), "API error (502): no details");
    }

    #[test]
    fn config_follows_scout_config() {
        let mut config = ScoutConfig::default();
        config.polling.interval_secs = 2;
        config.research.max_steps = 30;
        let controller = ControllerConfig::from_config(&config);
        assert_eq!(controller.poll_interval, Duration::from_secs(2));
        assert_eq!(controller.research.max_steps, 30);
        assert_eq!(
            ControllerConfig::default().poll_interval,
            Duration::from_secs(5)
        );
    }

    #[test]
    fn submit_request_defaults_options() {
        let request = SubmitRequest::new("q", "gpt-4o", Mode::Search);
        assert_eq!(request.options, JobOptions::default());
        let request = request.with_options(JobOptions {
            use_planner: false,
            headless: false,
        });
        assert!(!request.options.headless);
    }

    #[test]
    fn event_targets_match_status_table() {
        assert_eq!(JobEvent::ReportPending.target(), JobStatus::Running);
        assert_eq!(
            JobEvent::ReportFetched(Err("x".into())).target(),
            JobStatus::Completed
        );
        assert_eq!(JobEvent::Cancel.target(), JobStatus::Cancelled);
        assert_eq!(JobEvent::Reset.target(), JobStatus::Idle);
    }
}
