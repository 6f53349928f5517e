//! Handlers for the question endpoints.
//!
//! `/ask` returns the raw subtask outputs of one run; `/chat` returns a
//! classified reply and the caller's history with the exchange appended.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use jobchat_core::message::{ChatLog, ClassifiedMessage};
use jobchat_core::output::SubtaskOutput;
use jobchat_core::question::Question;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
}

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: Option<String>,
    /// Prior exchanges, owned by the caller and echoed back extended.
    #[serde(default)]
    pub history: ChatLog,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: ClassifiedMessage,
    pub history: ChatLog,
}

/// POST /api/v1/ask
///
/// Runs the configured job for the question and returns every subtask output
/// in task order. A subtask whose output could not be fetched appears as
/// `{"error": ..., "task_key": ..., "details": ...}`.
pub async fn ask(
    State(state): State<AppState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<Vec<SubtaskOutput>>> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let question = Question::parse(req.question.as_deref())?;

    let outputs = state.bridge.run(question.as_str(), &state.shutdown).await?;
    Ok(Json(outputs))
}

/// POST /api/v1/chat
///
/// Answers with a single classified bot message. Remote failures become a
/// text reply rather than an HTTP error; only a missing question (400) or a
/// server shutdown (503) is reported as an error.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ChatResponse>>> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let question = Question::parse(req.question.as_deref())?;

    let mut history = req.history;
    let reply = state
        .bridge
        .converse(&mut history, question.as_str(), &state.shutdown)
        .await?;

    Ok(Json(DataResponse {
        data: ChatResponse { reply, history },
    }))
}
