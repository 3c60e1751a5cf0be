//! Scripted in-memory backend for controller tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scout_api::{
    ApiError, JobBackend, RemoteStatus, ResearchRecord, SearchRequest, StartResearchRequest,
};

pub const JOB_ID: &str = "job-1";
pub const REPORT: &str = "# Report\n\nFindings.";

/// One request the controller made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(SearchRequest),
    Start(StartResearchRequest),
    Status(String),
    Report(String),
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    search: Option<Result<String, ApiError>>,
    start: Option<Result<String, ApiError>>,
    start_delay: Duration,
    statuses: VecDeque<Result<ResearchRecord, ApiError>>,
    status_delay: Duration,
    report: Option<Result<Option<String>, ApiError>>,
}

/// Replies from a script; anything unscripted gets a benign default
/// (search results, `job-1`, `running`, a short report).
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    script: Arc<Mutex<Script>>,
}

pub fn record(status: &str) -> ResearchRecord {
    ResearchRecord {
        id: Some(JOB_ID.to_string()),
        status: RemoteStatus::from(status.to_string()),
        query: None,
        model: None,
        provider: None,
        start_time: None,
        end_time: None,
        error: None,
        message: None,
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        self.script
            .lock()
            .unwrap()
            .statuses
            .extend(statuses.iter().map(|s| Ok(record(s))));
        self
    }

    pub fn then_status(self, reply: Result<ResearchRecord, ApiError>) -> Self {
        self.script.lock().unwrap().statuses.push_back(reply);
        self
    }

    pub fn with_search(self, reply: Result<String, ApiError>) -> Self {
        self.script.lock().unwrap().search = Some(reply);
        self
    }

    pub fn with_start(self, reply: Result<String, ApiError>) -> Self {
        self.script.lock().unwrap().start = Some(reply);
        self
    }

    pub fn with_report(self, reply: Result<Option<String>, ApiError>) -> Self {
        self.script.lock().unwrap().report = Some(reply);
        self
    }

    pub fn with_start_delay(self, delay: Duration) -> Self {
        self.script.lock().unwrap().start_delay = delay;
        self
    }

    pub fn with_status_delay(self, delay: Duration) -> Self {
        self.script.lock().unwrap().status_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Status(_)))
            .count()
    }

    pub fn report_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Report(_)))
            .count()
    }

    fn record_call(&self, call: Call) {
        self.script.lock().unwrap().calls.push(call);
    }
}

impl JobBackend for ScriptedBackend {
    async fn search(&self, request: &SearchRequest) -> Result<String, ApiError> {
        self.record_call(Call::Search(request.clone()));
        let reply = self.script.lock().unwrap().search.take();
        reply.unwrap_or_else(|| Ok(format!("Results for: {}", request.query)))
    }

    async fn start_research(&self, request: &StartResearchRequest) -> Result<String, ApiError> {
        self.record_call(Call::Start(request.clone()));
        let delay = self.script.lock().unwrap().start_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let reply = self.script.lock().unwrap().start.take();
        reply.unwrap_or_else(|| Ok(JOB_ID.to_string()))
    }

    async fn research_status(&self, research_id: &str) -> Result<ResearchRecord, ApiError> {
        self.record_call(Call::Status(research_id.to_string()));
        let delay = self.script.lock().unwrap().status_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let reply = self.script.lock().unwrap().statuses.pop_front();
        reply.unwrap_or_else(|| Ok(record("running")))
    }

    async fn research_report(&self, research_id: &str) -> Result<Option<String>, ApiError> {
        self.record_call(Call::Report(research_id.to_string()));
        let reply = self.script.lock().unwrap().report.take();
        reply.unwrap_or_else(|| Ok(Some(REPORT.to_string())))
    }
}
