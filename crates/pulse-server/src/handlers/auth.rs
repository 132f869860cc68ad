//! Authentication-related handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::info;

use pulse_core::models::{LoginRequest, LoginResponse, User};

use crate::{AppError, AppState};

/// POST /api/login - Exchange the demo credentials for a bearer token
///
/// Failures are a structured `{ok: false, error}` body with 401.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    match state.store.login(&req.email, &req.password) {
        Ok((token, user)) => {
            info!(user = %user.email, "Login succeeded");
            Ok(Json(LoginResponse::success(token, user)).into_response())
        }
        Err(pulse_core::Error::InvalidCredentials) => Ok((
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse::failure("Invalid credentials")),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/me - The user behind the presented session
pub async fn get_me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
