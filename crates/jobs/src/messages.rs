//! Request and response bodies of the remote job service.
//!
//! Only the fields the bridge reads are modelled; everything else in the
//! service's responses is ignored on deserialization.

use std::collections::BTreeMap;

use jobchat_core::ids::{JobId, RunId};
use jobchat_core::output::SubtaskRef;
use jobchat_core::status::RunState;
use serde::{Deserialize, Serialize};

/// Body of `POST /jobs/run-now`.
#[derive(Debug, Serialize)]
pub struct RunNowRequest<'a> {
    pub job_id: &'a JobId,
    pub notebook_params: &'a BTreeMap<String, String>,
}

/// Response of `POST /jobs/run-now`.
#[derive(Debug, Deserialize)]
pub struct RunNowResponse {
    pub run_id: RunId,
}

/// Response of `GET /jobs/runs/get`.
///
/// `tasks` is only meaningful once `state` is terminal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunSnapshot {
    pub state: RunState,
    #[serde(default)]
    pub tasks: Vec<SubtaskRef>,
}

impl RunSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}
