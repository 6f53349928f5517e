//! Collection of per-subtask outputs once a run is terminal.

use jobchat_core::output::{SubtaskOutput, SubtaskRef};

use crate::service::JobService;

/// Fetch the output of every subtask, in order.
///
/// Always returns one entry per ref. A subtask whose output cannot be
/// fetched is recorded as [`SubtaskOutput::Failed`] and the remaining
/// subtasks are still fetched. An empty `tasks` slice yields an empty vec.
pub async fn aggregate_outputs<S: JobService>(
    service: &S,
    tasks: &[SubtaskRef],
) -> Vec<SubtaskOutput> {
    let mut outputs = Vec::with_capacity(tasks.len());

    for task in tasks {
        match service.get_output(&task.run_id).await {
            Ok(payload) => {
                tracing::debug!(
                    task_key = %task.task_key,
                    task_run_id = %task.run_id,
                    "Fetched subtask output",
                );
                outputs.push(SubtaskOutput::Success(payload));
            }
            Err(e) => {
                tracing::error!(
                    task_key = %task.task_key,
                    task_run_id = %task.run_id,
                    error = %e,
                    "Failed to get output for task",
                );
                outputs.push(SubtaskOutput::Failed {
                    task_key: task.task_key.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    let failed = outputs.iter().filter(|o| o.is_failed()).count();
    tracing::debug!(subtasks = outputs.len(), failed, "Aggregated subtask outputs");
    outputs
}
