//! Finance statistics handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use pulse_core::insights::build_insights;
use pulse_core::models::{FinanceStats, InsightCard};

use crate::{AppError, AppState};

/// GET /api/finance/stats - ROI, profitability series and waste alerts
pub async fn get_finance_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinanceStats>, AppError> {
    Ok(Json(state.store.finance_stats()?))
}

/// GET /api/insights - Insight cards derived from the current stats
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<InsightCard>>, AppError> {
    let stats = state.store.finance_stats()?;
    Ok(Json(build_insights(&stats)))
}
