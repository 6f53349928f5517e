#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use jobchat_api::config::{AppConfig, JobsConfig, ServerConfig};
use jobchat_api::router::build_app_router;
use jobchat_api::state::AppState;
use jobchat_core::ids::JobId;
use jobchat_jobs::api::JobsApi;
use jobchat_jobs::poller::PollConfig;
use serde::Deserialize;
use serde_json::{json, Value};

/// Scripted behaviour of the fake job service.
#[derive(Clone, Default)]
pub struct FakeJobs {
    /// Reject `run-now` with this status and body.
    pub reject: Option<(StatusCode, &'static str)>,
    /// Report `RUNNING` forever.
    pub never_finish: bool,
    /// Subtasks as `(task_key, run_id, result)`; `None` answers get-output with 404.
    pub tasks: Vec<(&'static str, i64, Option<&'static str>)>,
    /// Questions received by `run-now`.
    pub submitted: Arc<Mutex<Vec<String>>>,
}

impl FakeJobs {
    pub fn answering(result: &'static str) -> Self {
        Self {
            tasks: vec![("answer", 43, Some(result))],
            ..Self::default()
        }
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

#[derive(Deserialize)]
struct RunIdQuery {
    run_id: i64,
}

async fn run_now(State(fake): State<FakeJobs>, Json(body): Json<Value>) -> Response {
    let question = body["notebook_params"]["question"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    fake.submitted.lock().unwrap().push(question);
    match fake.reject {
        Some((status, body)) => (status, body).into_response(),
        None => Json(json!({ "run_id": 42 })).into_response(),
    }
}

async fn runs_get(State(fake): State<FakeJobs>, Query(q): Query<RunIdQuery>) -> Json<Value> {
    let state = if fake.never_finish {
        "RUNNING"
    } else {
        "TERMINATED"
    };
    let tasks: Vec<Value> = fake
        .tasks
        .iter()
        .map(|(key, id, _)| json!({ "task_key": key, "run_id": id }))
        .collect();
    Json(json!({
        "run_id": q.run_id,
        "state": { "life_cycle_state": state, "result_state": "SUCCESS" },
        "tasks": tasks,
    }))
}

async fn get_output(State(fake): State<FakeJobs>, Query(q): Query<RunIdQuery>) -> Response {
    let found = fake
        .tasks
        .iter()
        .find(|(_, id, _)| *id == q.run_id)
        .and_then(|(_, _, result)| *result);
    match found {
        Some(result) => Json(json!({
            "notebook_output": { "result": result, "truncated": false }
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            r#"{"error_code":"RESOURCE_DOES_NOT_EXIST"}"#,
        )
            .into_response(),
    }
}

/// Serve `fake` on an ephemeral local port and return its API base URL.
pub async fn spawn_fake_jobs(fake: FakeJobs) -> String {
    let router = Router::new()
        .route("/api/2.1/jobs/run-now", post(run_now))
        .route("/api/2.1/jobs/runs/get", get(runs_get))
        .route("/api/2.1/jobs/runs/get-output", get(get_output))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/2.1")
}

/// Build a test `AppConfig` pointing at `base_url`, with a 1 s poll interval
/// and a 1 s poll timeout.
pub fn test_config(base_url: String) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:8501".to_string()],
            request_timeout_secs: 30,
        },
        jobs: JobsConfig {
            base_url,
            token: "dapi-test-token".to_string(),
            job_id: JobId::Number(1065737057597852),
            http_timeout: Duration::from_secs(5),
            poll: PollConfig {
                interval: Duration::from_secs(1),
                timeout: Duration::from_secs(1),
            },
        },
    }
}

/// Build the full application router against a fake job service.
pub async fn build_test_app(fake: FakeJobs) -> Router {
    let config = test_config(spawn_fake_jobs(fake).await);
    build_app(config)
}

pub fn build_app(config: AppConfig) -> Router {
    let api = JobsApi::new(&config.jobs.api_config()).unwrap();
    build_app_router(AppState::new(&config.jobs, api), &config.server)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
