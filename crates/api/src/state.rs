use std::sync::Arc;

use jobchat_jobs::api::JobsApi;
use jobchat_jobs::bridge::Bridge;
use tokio_util::sync::CancellationToken;

use crate::config::JobsConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Question façade bound to the configured job.
    pub bridge: Bridge<JobsApi>,
    /// Cancelled when the server begins shutting down, so in-flight polls
    /// stop instead of holding the process open.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(jobs: &JobsConfig, api: JobsApi) -> Self {
        Self {
            bridge: Bridge::new(Arc::new(api), jobs.job_id.clone(), jobs.poll),
            shutdown: CancellationToken::new(),
        }
    }
}
