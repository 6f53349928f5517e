#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use jobchat_core::ids::{JobId, RunId};
use jobchat_core::output::SubtaskRef;
use jobchat_core::status::{LifeCycleState, RunState};
use jobchat_jobs::error::{FetchError, JobsError};
use jobchat_jobs::messages::RunSnapshot;
use jobchat_jobs::service::JobService;
use serde_json::{json, Value};

/// A remote call observed by [`ScriptedJobService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Submit { question: String },
    Status(RunId),
    Output(RunId),
}

/// How the scripted service answers a submission.
pub enum SubmitBehavior {
    Accept(RunId),
    Reject { status: u16, body: String },
}

/// In-memory job service that replays scripted responses and records every
/// call it receives.
///
/// Status responses are consumed in order; the last one repeats forever.
pub struct ScriptedJobService {
    submit: SubmitBehavior,
    statuses: Mutex<VecDeque<RunSnapshot>>,
    status_delay: Option<Duration>,
    outputs: HashMap<RunId, Result<Value, FetchError>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedJobService {
    pub fn new(run_id: i64) -> Self {
        Self {
            submit: SubmitBehavior::Accept(RunId::Number(run_id)),
            statuses: Mutex::new(VecDeque::new()),
            status_delay: None,
            outputs: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self {
            submit: SubmitBehavior::Reject {
                status,
                body: body.to_string(),
            },
            ..Self::new(0)
        }
    }

    pub fn with_status(self, snapshot: RunSnapshot) -> Self {
        self.statuses.lock().unwrap().push_back(snapshot);
        self
    }

    /// Make every status fetch take `delay` on the tokio clock.
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = Some(delay);
        self
    }

    pub fn with_output(mut self, task_run_id: i64, result: &str) -> Self {
        self.outputs
            .insert(RunId::Number(task_run_id), Ok(notebook_output(result)));
        self
    }

    pub fn with_failed_output(mut self, task_run_id: i64, status: u16) -> Self {
        self.outputs.insert(
            RunId::Number(task_run_id),
            Err(FetchError::Status {
                status,
                body: "{\"error_code\":\"INVALID_STATE\"}".to_string(),
            }),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Status(_)))
            .count()
    }

    pub fn output_calls(&self) -> Vec<RunId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Output(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl JobService for ScriptedJobService {
    async fn submit(
        &self,
        _job_id: &JobId,
        params: &BTreeMap<String, String>,
    ) -> Result<RunId, JobsError> {
        self.record(Call::Submit {
            question: params.get("question").cloned().unwrap_or_default(),
        });
        match &self.submit {
            SubmitBehavior::Accept(run_id) => Ok(run_id.clone()),
            SubmitBehavior::Reject { status, body } => Err(JobsError::Dispatch {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    async fn get_status(&self, run_id: &RunId) -> Result<RunSnapshot, JobsError> {
        self.record(Call::Status(run_id.clone()));
        if let Some(delay) = self.status_delay {
            tokio::time::sleep(delay).await;
        }
        let mut statuses = self.statuses.lock().unwrap();
        let snapshot = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        snapshot.ok_or_else(|| JobsError::Protocol("no scripted status".to_string()))
    }

    async fn get_output(&self, task_run_id: &RunId) -> Result<Value, FetchError> {
        self.record(Call::Output(task_run_id.clone()));
        self.outputs
            .get(task_run_id)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Request("connection refused".to_string())))
    }
}

pub fn notebook_output(result: &str) -> Value {
    json!({ "notebook_output": { "result": result, "truncated": false } })
}

pub fn snapshot(state: LifeCycleState) -> RunSnapshot {
    RunSnapshot {
        state: RunState::new(state),
        tasks: Vec::new(),
    }
}

/// A terminated snapshot listing `(task_key, task_run_id)` subtasks.
pub fn terminated(tasks: &[(&str, i64)]) -> RunSnapshot {
    RunSnapshot {
        state: RunState {
            life_cycle_state: LifeCycleState::Terminated,
            result_state: Some("SUCCESS".to_string()),
            state_message: None,
        },
        tasks: tasks
            .iter()
            .map(|(key, id)| SubtaskRef {
                task_key: key.to_string(),
                run_id: RunId::Number(*id),
            })
            .collect(),
    }
}
