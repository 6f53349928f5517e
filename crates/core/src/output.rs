//! Subtask references and per-subtask outputs.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::ids::RunId;

/// One unit of execution within a run, as listed by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskRef {
    pub task_key: String,
    /// Task-level run id, used to fetch this subtask's output.
    pub run_id: RunId,
}

/// Output of one subtask: the raw payload, or a recorded fetch failure.
///
/// Failures are kept in place so the aggregated sequence always has one
/// entry per [`SubtaskRef`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubtaskOutput {
    Success(Value),
    Failed { task_key: String, message: String },
}

impl SubtaskOutput {
    /// The nested `notebook_output.result` string of a successful output.
    pub fn result_text(&self) -> Option<&str> {
        match self {
            Self::Success(payload) => payload
                .get("notebook_output")
                .and_then(|o| o.get("result"))
                .and_then(Value::as_str),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// `"Failed to get output for task <key>"` for failures.
    pub fn failure_summary(&self) -> Option<String> {
        match self {
            Self::Failed { task_key, .. } => {
                Some(format!("Failed to get output for task {task_key}"))
            }
            Self::Success(_) => None,
        }
    }
}

/// Successes serialize as the raw payload; failures as
/// `{"error": ..., "task_key": ..., "details": ...}`.
impl Serialize for SubtaskOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(payload) => payload.serialize(serializer),
            Self::Failed { task_key, message } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry(
                    "error",
                    &format!("Failed to get output for task {task_key}"),
                )?;
                map.serialize_entry("task_key", task_key)?;
                map.serialize_entry("details", message)?;
                map.end()
            }
        }
    }
}
