//! The question-answering façade.
//!
//! [`Bridge`] composes submission, polling, aggregation and classification.
//! It holds only read-only configuration, so one instance can be shared by
//! any number of concurrent questions; each call keeps its run and outputs
//! on its own stack.

use std::sync::Arc;

use jobchat_core::classify::classify_outputs;
use jobchat_core::ids::JobId;
use jobchat_core::message::{ChatLog, ClassifiedMessage};
use jobchat_core::output::SubtaskOutput;
use jobchat_core::question::Question;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::aggregator::aggregate_outputs;
use crate::error::JobsError;
use crate::poller::{PollConfig, Poller};
use crate::run::{question_params, JobRun};
use crate::service::JobService;

/// Answers chat questions by running a remote job.
pub struct Bridge<S> {
    service: Arc<S>,
    job_id: JobId,
    poller: Poller,
}

impl<S> Clone for Bridge<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            job_id: self.job_id.clone(),
            poller: self.poller.clone(),
        }
    }
}

impl<S: JobService> Bridge<S> {
    pub fn new(service: Arc<S>, job_id: JobId, poll: PollConfig) -> Self {
        Self {
            service,
            job_id,
            poller: Poller::new(poll),
        }
    }

    /// Submit `question`, wait for the run and collect every subtask output.
    ///
    /// Rejects blank questions with [`JobsError::Validation`] before any
    /// remote call.
    pub async fn run(
        &self,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SubtaskOutput>, JobsError> {
        let question = Question::try_from(question)?;
        let span = tracing::info_span!("ask", ask_id = %Uuid::now_v7(), job_id = %self.job_id);
        self.run_question(question, cancel).instrument(span).await
    }

    /// Answer `question` with a single classified bot message.
    ///
    /// Only [`JobsError::Validation`] and [`JobsError::Cancelled`] are
    /// returned as errors. Any other failure becomes a text reply with a
    /// generic description; the detail goes to the log.
    pub async fn ask_question(
        &self,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<ClassifiedMessage, JobsError> {
        match self.run(question, cancel).await {
            Ok(outputs) => Ok(classify_outputs(&outputs)),
            Err(e @ (JobsError::Validation(_) | JobsError::Cancelled)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "Question failed");
                Ok(ClassifiedMessage::bot_text(e.user_message()))
            }
        }
    }

    /// Ask `question` and append the exchange to the caller's log.
    ///
    /// The log is left untouched when the question is rejected or the call
    /// is cancelled. Returns the bot reply.
    pub async fn converse(
        &self,
        log: &mut ChatLog,
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<ClassifiedMessage, JobsError> {
        let reply = self.ask_question(question, cancel).await?;
        log.push(ClassifiedMessage::user(question.trim()));
        log.push(reply.clone());
        Ok(reply)
    }

    async fn run_question(
        &self,
        question: Question,
        cancel: &CancellationToken,
    ) -> Result<Vec<SubtaskOutput>, JobsError> {
        tracing::debug!(question = %question, "Received question");

        let params = question_params(&question);
        let run_id = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(JobsError::Cancelled),
            result = self.service.submit(&self.job_id, &params) => result?,
        };
        let run = JobRun::new(run_id, self.job_id.clone(), params);
        tracing::info!(
            run_id = %run.run_id(),
            job_id = %run.job_id(),
            params = ?run.parameters(),
            "Run submitted",
        );

        let snapshot = self
            .poller
            .wait(self.service.as_ref(), run.run_id(), cancel)
            .await?;

        let outputs = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(JobsError::Cancelled),
            outputs = aggregate_outputs(self.service.as_ref(), &snapshot.tasks) => outputs,
        };

        tracing::info!(
            run_id = %run.run_id(),
            subtasks = outputs.len(),
            "Run outputs collected",
        );
        Ok(outputs)
    }
}
