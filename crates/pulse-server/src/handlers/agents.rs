//! Agent marketplace handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use pulse_core::models::AgentActionResponse;
use pulse_core::AgentType;

use crate::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct ActivateAgentRequest {
    #[serde(rename = "type")]
    pub agent_type: String,
}

/// POST /api/agents/activate - Run an agent and return the refreshed stats
pub async fn activate_agent(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ActivateAgentRequest>,
) -> Result<Json<AgentActionResponse>, AppError> {
    let agent: AgentType = req.agent_type.parse()?;
    Ok(Json(state.store.activate_agent(agent)?))
}
