//! HTTP request handlers

use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use super::AppState;
use crate::relay::RelayError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

/// Fixed failure body; upstream detail never leaks to callers.
const GENERIC_ERROR: &str = "An error occurred while processing your request.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .with_state(state)
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let content = state.relay.relay(&req.messages).await?;
    Ok(Json(ChatResponse { content }))
}

// ============================================================
// Error Handling
// ============================================================

struct AppError(RelayError);

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Relay request failed");

        let body = Json(ErrorResponse::new(GENERIC_ERROR));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
