//! Background status polling for a running research job.
//!
//! Runs as a `tokio::spawn` task that stops through a `watch` channel. The
//! task holds only a weak reference to the controller, so dropping the last
//! controller ends polling too.

use std::sync::Weak;
use std::time::Duration;

use scout_api::JobBackend;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::controller::Shared;

/// Bounds applied to the poll period. `interval_at` panics on a zero period
/// or on an instant that overflows.
const MIN_PERIOD: Duration = Duration::from_millis(1);
const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

pub(crate) struct Poller {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Start polling `generation` every `period`, first tick one period from now.
    pub(crate) fn spawn<B: JobBackend>(
        shared: Weak<Shared<B>>,
        generation: u64,
        period: Duration,
    ) -> Self {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(poll_loop(shared, generation, period, stop_rx));
        tracing::debug!(generation, period_secs = period.as_secs_f64(), "poll loop started");
        Self { stop_tx, handle }
    }

    /// End the loop once the current tick (if any) returns.
    pub(crate) fn stop(self) {
        let _ = self.stop_tx.send(true);
    }

    /// End the loop now, dropping any in-flight request.
    pub(crate) fn abort(self) {
        let _ = self.stop_tx.send(true);
        self.handle.abort();
    }
}

async fn poll_loop<B: JobBackend>(
    shared: Weak<Shared<B>>,
    generation: u64,
    period: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                shared.poll_once(generation).await;
            }
        }
    }
    tracing::debug!(generation, "poll loop stopped");
}
