//! HTTP error responses
//!
//! Domain errors the caller can fix keep their message and status. Anything
//! else becomes a 500 with a generic body and the cause is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Error returned by every handler, rendered as `{"error": message}`
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    cause: Option<anyhow::Error>,
}

impl AppError {
    fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
            cause: None,
        }
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn internal(msg: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(cause) = &self.cause {
            error!(error = %cause, "Request failed");
        }

        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

/// Status for domain errors the caller can act on
fn client_status(err: &pulse_core::Error) -> Option<StatusCode> {
    use pulse_core::Error;

    match err {
        Error::InvalidCredentials | Error::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
        Error::InvalidData(_) | Error::UnknownAgent(_) => Some(StatusCode::BAD_REQUEST),
        Error::NotFound(_) => Some(StatusCode::NOT_FOUND),
        _ => None,
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        match err.downcast_ref::<pulse_core::Error>().and_then(|domain| {
            client_status(domain).map(|status| (status, domain.to_string()))
        }) {
            Some((status, message)) => Self::new(status, &message),
            None => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                cause: Some(err),
            },
        }
    }
}
