//! Run-to-terminal polling.
//!
//! [`Poller::wait`] fetches a run's status, sleeps a fixed interval and
//! repeats until the run is terminal, the next fetch would fall outside the
//! overall budget, or the caller cancels. Waiting uses the tokio clock, so tests can pause and
//! advance time.

use std::time::Duration;

use jobchat_core::ids::RunId;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::JobsError;
use crate::messages::RunSnapshot;
use crate::service::JobService;

/// Default delay between two status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default overall budget for one run to finish.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(600);

/// Tunable parameters for the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two status fetches.
    pub interval: Duration,
    /// Overall budget, measured from the first status fetch.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Drives a submitted run to a terminal state.
#[derive(Debug, Clone)]
pub struct Poller {
    config: PollConfig,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Poll `run_id` until it is terminal.
    ///
    /// Returns the terminal snapshot (whose `tasks` are then meaningful),
    /// [`JobsError::PollTimeout`] once the budget is spent, or
    /// [`JobsError::Cancelled`] as soon as `cancel` fires. A failed status
    /// fetch ends the loop with that error.
    pub async fn wait<S: JobService>(
        &self,
        service: &S,
        run_id: &RunId,
        cancel: &CancellationToken,
    ) -> Result<RunSnapshot, JobsError> {
        let started = Instant::now();
        let deadline = started + self.config.timeout;
        let mut polls = 0u32;

        loop {
            polls += 1;
            let snapshot = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(%run_id, polls, "Polling cancelled");
                    return Err(JobsError::Cancelled);
                }
                result = tokio::time::timeout_at(deadline, service.get_status(run_id)) => {
                    match result {
                        Ok(snapshot) => snapshot?,
                        Err(_) => return Err(self.timed_out(run_id, started, polls)),
                    }
                }
            };

            let state = snapshot.state.life_cycle_state;
            if state.is_terminal() {
                tracing::info!(
                    %run_id,
                    life_cycle_state = %state,
                    result_state = snapshot.state.result_state.as_deref().unwrap_or("-"),
                    polls,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Run reached terminal state",
                );
                return Ok(snapshot);
            }
            tracing::debug!(%run_id, life_cycle_state = %state, polls, "Run still in progress");

            // Never start a fetch at or past the deadline.
            let wake = Instant::now() + self.config.interval;
            if wake >= deadline {
                return Err(self.timed_out(run_id, started, polls));
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(%run_id, polls, "Polling cancelled");
                    return Err(JobsError::Cancelled);
                }
                _ = tokio::time::sleep_until(wake) => {}
            }
        }
    }

    fn timed_out(&self, run_id: &RunId, started: Instant, polls: u32) -> JobsError {
        let waited = started.elapsed();
        tracing::warn!(
            %run_id,
            polls,
            waited_ms = waited.as_millis() as u64,
            timeout_ms = self.config.timeout.as_millis() as u64,
            "Run did not finish within poll timeout",
        );
        JobsError::PollTimeout {
            run_id: run_id.clone(),
            waited,
        }
    }
}
