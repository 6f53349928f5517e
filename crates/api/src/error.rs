use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jobchat_core::error::CoreError;
use jobchat_jobs::error::JobsError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`JobsError`] for failures of the question pipeline and adds
/// HTTP-specific variants. Renders as `{"error", "details", "code"}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Jobs(#[from] JobsError),

    /// A malformed request body.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Jobs(JobsError::Validation(err))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Jobs(jobs) => match jobs {
                JobsError::Validation(CoreError::Validation(msg)) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    None,
                ),
                JobsError::Dispatch { status, body } => {
                    tracing::error!(status, body = %body, "Job dispatch failed");
                    (
                        dispatch_status(*status),
                        "DISPATCH_FAILED",
                        jobs.user_message().to_string(),
                        Some(body.clone()),
                    )
                }
                JobsError::PollTimeout { .. } => {
                    tracing::warn!(error = %jobs, "Run did not finish in time");
                    (
                        StatusCode::GATEWAY_TIMEOUT,
                        "POLL_TIMEOUT",
                        jobs.user_message().to_string(),
                        Some(jobs.to_string()),
                    )
                }
                JobsError::Protocol(_) | JobsError::Transport(_) => {
                    tracing::error!(error = %jobs, "Job service call failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        jobs.user_message().to_string(),
                        Some(jobs.to_string()),
                    )
                }
                JobsError::Cancelled => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CANCELLED",
                    jobs.user_message().to_string(),
                    None,
                ),
            },

            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
        };

        let body = json!({
            "error": message,
            "details": details,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Mirror the remote rejection status; anything that is not an error status
/// becomes 502.
fn dispatch_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
