//! # scout-jobs
//!
//! Lifecycle of a single search or deep research job:
//! submit → poll status → fetch report → terminate.
//!
//! [`ResearchJobController`] is the only writer of job state. It talks to the
//! backend through [`scout_api::JobBackend`], polls running research jobs on a
//! fixed interval in a background task, and publishes every state change on a
//! `watch` channel for renderers.
//!
//! ```no_run
//! use scout_api::BackendClient;
//! use scout_core::Mode;
//! use scout_jobs::{ControllerConfig, ResearchJobController, SubmitRequest};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let backend = BackendClient::new("http://localhost:5000/api")?;
//! let controller = ResearchJobController::new(backend, ControllerConfig::default());
//! let handle = controller
//!     .submit(SubmitRequest::new("rust async runtimes", "gemini-2.0-flash", Mode::Research))
//!     .await?;
//! let job = handle.wait().await;
//! println!("{}", job.result.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod handle;
mod poller;

pub use controller::{ControllerConfig, ResearchJobController, SUBMIT_FAILURE, SubmitRequest};
pub use error::SubmitError;
pub use handle::JobHandle;
