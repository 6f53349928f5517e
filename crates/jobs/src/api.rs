//! REST API client for the remote job service.
//!
//! Wraps the three job endpoints (run submission, run status, task output)
//! using [`reqwest`]. Every request carries the bearer credential and is
//! bounded by the client-wide timeout.

use std::collections::BTreeMap;
use std::time::Duration;

use jobchat_core::ids::{JobId, RunId};
use serde_json::Value;

use crate::error::{FetchError, JobsError};
use crate::messages::{RunNowRequest, RunNowResponse, RunSnapshot};
use crate::service::JobService;

/// Default per-request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`JobsApi`].
#[derive(Debug, Clone)]
pub struct JobsApiConfig {
    /// Base URL up to and including the API version, e.g.
    /// `https://host/api/2.1`.
    pub base_url: String,
    /// Bearer credential sent on every request.
    pub token: String,
    /// Per-request timeout. Must be non-zero.
    pub timeout: Duration,
}

/// HTTP client for one job service.
pub struct JobsApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl JobsApi {
    /// Build a client with its own connection pool and timeout.
    pub fn new(config: &JobsApiConfig) -> Result<Self, JobsError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.token.clone(),
        ))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a run. Sends `POST /jobs/run-now`.
    pub async fn run_now(
        &self,
        job_id: &JobId,
        params: &BTreeMap<String, String>,
    ) -> Result<RunId, JobsError> {
        let body = RunNowRequest {
            job_id,
            notebook_params: params,
        };

        let response = self
            .client
            .post(self.url("/jobs/run-now"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            tracing::error!(status = status.as_u16(), body = %body, "Failed to run notebook");
            return Err(JobsError::Dispatch {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: RunNowResponse = parse_body(response, "run-now").await?;
        Ok(parsed.run_id)
    }

    /// Fetch run state and tasks. Sends `GET /jobs/runs/get?run_id=..`.
    pub async fn get_run(&self, run_id: &RunId) -> Result<RunSnapshot, JobsError> {
        let response = self
            .client
            .get(self.url("/jobs/runs/get"))
            .bearer_auth(&self.token)
            .query(&[("run_id", run_id.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(JobsError::Protocol(format!(
                "runs/get for run {run_id} returned HTTP {}: {body}",
                status.as_u16()
            )));
        }

        parse_body(response, "runs/get").await
    }

    /// Fetch one task's output. Sends `GET /jobs/runs/get-output?run_id=..`.
    pub async fn get_run_output(&self, task_run_id: &RunId) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(self.url("/jobs/runs/get-output"))
            .bearer_auth(&self.token)
            .query(&[("run_id", task_run_id.to_string())])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: read_body(response).await,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| FetchError::Body(e.to_string()))
    }
}

impl JobService for JobsApi {
    async fn submit(
        &self,
        job_id: &JobId,
        params: &BTreeMap<String, String>,
    ) -> Result<RunId, JobsError> {
        self.run_now(job_id, params).await
    }

    async fn get_status(&self, run_id: &RunId) -> Result<RunSnapshot, JobsError> {
        self.get_run(run_id).await
    }

    async fn get_output(&self, task_run_id: &RunId) -> Result<Value, FetchError> {
        self.get_run_output(task_run_id).await
    }
}

// ---- private helpers ----

/// Read a response body for diagnostics, tolerating read failures.
async fn read_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string())
}

/// Parse a successful JSON body, mapping shape mismatches to
/// [`JobsError::Protocol`].
async fn parse_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, JobsError> {
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| JobsError::Protocol(format!("unexpected {endpoint} response: {e}")))
}
