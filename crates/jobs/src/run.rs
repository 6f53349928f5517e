//! A submitted run of the configured job.

use std::collections::BTreeMap;

use jobchat_core::ids::{JobId, RunId};
use jobchat_core::question::Question;

/// Notebook parameter carrying the question text.
pub const QUESTION_PARAM: &str = "question";

/// Build the notebook parameters for a question.
pub fn question_params(question: &Question) -> BTreeMap<String, String> {
    BTreeMap::from([(QUESTION_PARAM.to_string(), question.as_str().to_string())])
}

/// One accepted submission. Owned by a single question for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRun {
    run_id: RunId,
    job_id: JobId,
    parameters: BTreeMap<String, String>,
}

impl JobRun {
    pub fn new(run_id: RunId, job_id: JobId, parameters: BTreeMap<String, String>) -> Self {
        Self {
            run_id,
            job_id,
            parameters,
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}
