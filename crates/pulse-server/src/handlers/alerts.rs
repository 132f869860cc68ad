//! Alert handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use pulse_core::models::AlertItem;

use crate::{AppError, AppState, OkResponse};

/// GET /api/alerts - List alerts, newest first
pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AlertItem>>, AppError> {
    Ok(Json(state.store.list_alerts()?))
}

/// POST /api/alerts/:id/read - Mark an alert as read
///
/// Unknown ids are acknowledged as well.
pub async fn mark_alert_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    state.store.mark_alert_read(&id)?;
    Ok(Json(OkResponse { ok: true }))
}
