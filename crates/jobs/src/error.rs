//! Error taxonomy for job dispatch.

use std::time::Duration;

use jobchat_core::error::CoreError;
use jobchat_core::ids::RunId;

/// Errors that abort a single question.
#[derive(Debug, thiserror::Error)]
pub enum JobsError {
    /// The caller's input was rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The job service refused to start the run.
    #[error("Job submission rejected ({status}): {body}")]
    Dispatch {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The run never reached a terminal state within the poll budget.
    #[error("Run {run_id} did not reach a terminal state within {}s", .waited.as_secs())]
    PollTimeout { run_id: RunId, waited: Duration },

    /// A response did not have the expected shape.
    #[error("Unexpected response from job service: {0}")]
    Protocol(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller went away before the run finished.
    #[error("Request cancelled")]
    Cancelled,
}

impl JobsError {
    /// Text shown to chat users in place of the technical detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please enter a question.",
            Self::Dispatch { .. } => "Failed to run notebook",
            Self::PollTimeout { .. } => {
                "The job did not finish in time. Please try again later."
            }
            Self::Protocol(_) | Self::Transport(_) => {
                "An error occurred while processing your request."
            }
            Self::Cancelled => "The request was cancelled.",
        }
    }
}

/// Failure to fetch one subtask's output.
///
/// Never aborts a question: the aggregator records it in place of the
/// output and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid output body: {0}")]
    Body(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_display_carries_status_and_body() {
        let err = JobsError::Dispatch {
            status: 403,
            body: "{\"error_code\":\"PERMISSION_DENIED\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Job submission rejected (403): {\"error_code\":\"PERMISSION_DENIED\"}"
        );
        assert_eq!(err.user_message(), "Failed to run notebook");
    }

    #[test]
    fn poll_timeout_display_in_seconds() {
        let err = JobsError::PollTimeout {
            run_id: RunId::Number(12),
            waited: Duration::from_millis(600_400),
        };
        assert_eq!(
            err.to_string(),
            "Run 12 did not reach a terminal state within 600s"
        );
    }

    #[test]
    fn validation_is_transparent() {
        let err = JobsError::from(CoreError::Validation("No question provided".into()));
        assert_eq!(err.to_string(), "Validation failed: No question provided");
    }

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Status {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: not found");
    }
}
