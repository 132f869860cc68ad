//! Client registry handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use pulse_core::models::{ClientRecord, NewClient};

use crate::{AppError, AppState};

/// GET /api/clients - List clients in creation order
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClientRecord>>, AppError> {
    Ok(Json(state.store.list_clients()?))
}

/// POST /api/clients - Register a client
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(client): Json<NewClient>,
) -> Result<(StatusCode, Json<ClientRecord>), AppError> {
    let record = state.store.add_client(client)?;
    Ok((StatusCode::CREATED, Json(record)))
}
