use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// GET /api/ping
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.config.ping_message.clone(),
    })
}
