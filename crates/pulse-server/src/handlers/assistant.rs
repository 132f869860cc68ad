//! Assistant chat handler

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pulse_core::assistant::{self, Persona};

use crate::{authenticate, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub persona: Persona,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/assistant/chat - Canned assistant reply for a message
///
/// Live stats feed the reply only when the caller has a valid session.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request("Message is required"));
    }

    let stats = match authenticate(&state, &headers) {
        Ok(_) => Some(state.store.finance_stats()?),
        Err(e) if e.status() == StatusCode::UNAUTHORIZED => None,
        Err(e) => return Err(e),
    };
    debug!(persona = ?req.persona, with_stats = stats.is_some(), "Assistant chat");

    Ok(Json(ChatResponse {
        reply: assistant::reply(req.persona, message, stats.as_ref()),
    }))
}
