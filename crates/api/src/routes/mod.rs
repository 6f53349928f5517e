pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers::ask;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST /ask     raw subtask outputs
/// POST /chat    classified reply + history
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ask", post(ask::ask))
        .route("/chat", post(ask::chat))
}

/// Root-level `POST /ask`, kept for clients that predate `/api/v1`.
pub fn legacy_routes() -> Router<AppState> {
    Router::new().route("/ask", post(ask::ask))
}
