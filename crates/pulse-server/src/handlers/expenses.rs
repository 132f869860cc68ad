//! Ledger handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Response, StatusCode},
    Json,
};
use tracing::info;

use pulse_core::models::ExpenseItem;

use crate::{AppError, AppState};

/// GET /api/expenses - The signed ledger in creation order
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ExpenseItem>>, AppError> {
    Ok(Json(state.store.list_expenses()?))
}

/// GET /api/expenses/export - The ledger as a CSV download
pub async fn export_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, AppError> {
    let csv = state.store.export_csv()?;
    let rows = csv.lines().count().saturating_sub(1);
    info!("Exported {} ledger entries to CSV", rows);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"expenses.csv\"",
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(&e.to_string()))
}
