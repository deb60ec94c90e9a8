//! The chat endpoint: relay one user message through the orchestrator.

use crate::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use concierge_core::{ConciergeCoreError, SessionId, Topic};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Body accepted by `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message text.
    #[serde(default)]
    pub message: String,
    /// Optional topic tag narrowing the assistant's scope.
    #[serde(default)]
    pub topic: Option<String>,
    /// Session to continue; a fresh one is minted when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body returned by `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply text.
    pub reply: String,
    /// RFC 3339 completion time of the turn.
    pub timestamp: String,
    /// Session the turn was recorded under.
    pub session_id: String,
}

/// JSON error payload carrying an HTTP status.
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Relay one user message through the orchestrator and return the reply.
pub(crate) async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Message is required"));
    }
    let session_id = match request.session_id.as_deref() {
        Some(value) => SessionId::parse(value)
            .map_err(|err| ApiError::new(StatusCode::BAD_REQUEST, err.to_string()))?,
        None => SessionId::generate(),
    };
    let topic = request.topic.as_deref().and_then(Topic::parse);

    let result = state
        .orchestrator
        .handle_turn(&session_id, &request.message, topic)
        .await
        .map_err(|err| match err {
            ConciergeCoreError::EmptyMessage => {
                ApiError::new(StatusCode::BAD_REQUEST, "Message is required")
            }
            other => {
                warn!("turn failed (session_id={session_id}, error={other})");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        })?;

    Ok(Json(ChatResponse {
        reply: result.reply,
        timestamp: result.created_at.to_rfc3339(),
        session_id: session_id.as_str().to_string(),
    }))
}
