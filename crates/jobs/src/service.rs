//! The three remote operations the bridge depends on.

use std::collections::BTreeMap;
use std::future::Future;

use jobchat_core::ids::{JobId, RunId};
use serde_json::Value;

use crate::error::{FetchError, JobsError};
use crate::messages::RunSnapshot;

/// A remote job service.
///
/// [`crate::api::JobsApi`] talks to the real service over HTTP; tests plug
/// in scripted implementations. Every call is a single attempt: no retries
/// happen at this layer.
pub trait JobService: Send + Sync {
    /// Start a run of `job_id` with the given notebook parameters.
    ///
    /// A refusal by the service is [`JobsError::Dispatch`].
    fn submit(
        &self,
        job_id: &JobId,
        params: &BTreeMap<String, String>,
    ) -> impl Future<Output = Result<RunId, JobsError>> + Send;

    /// Fetch the lifecycle state and subtask list of a run.
    ///
    /// Callers must check the state before relying on `tasks`.
    fn get_status(
        &self,
        run_id: &RunId,
    ) -> impl Future<Output = Result<RunSnapshot, JobsError>> + Send;

    /// Fetch one subtask's raw output.
    ///
    /// Failures come back as a [`FetchError`] value, never as a fatal error.
    fn get_output(
        &self,
        task_run_id: &RunId,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}
