//! Pulse Web Server
//!
//! Axum-based REST API for the Pulse business dashboard.
//!
//! Access policy:
//! - Read endpoints are open so the dashboard works without logging in
//! - Mutating endpoints need a bearer session unless demo mode is on
//! - `GET /api/me` always needs a session

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{info, warn};

use pulse_core::models::User;
use pulse_core::Store;

mod config;
mod error;
mod handlers;
mod scheduler;

pub use error::AppError;
pub use config::{default_config_path, ScheduleConfig, ServerConfig, DEFAULT_PING_MESSAGE};
pub use scheduler::{run_alert_consumer, run_scheduler, start_alert_scheduler, AlertEvent};

/// Maximum invoice upload size (5 MB)
pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Headroom for multipart framing and text fields on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state
pub struct AppState {
    pub store: Store,
    pub config: ServerConfig,
}

/// Extract the bearer token from the Authorization header
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller's session
pub(crate) fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let token = bearer_token(headers).ok_or_else(|| AppError::unauthorized("Missing token"))?;
    match state.store.authenticate(token) {
        Ok(user) => Ok(user),
        Err(pulse_core::Error::Unauthorized(_)) => Err(AppError::unauthorized("Invalid token")),
        Err(e) => Err(e.into()),
    }
}

/// Session middleware that always requires a valid bearer token
///
/// The resolved [`User`] is stored as a request extension.
async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, request.headers()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            warn!(path = %request.uri().path(), "Unauthorized request - {}", e.message());
            e.into_response()
        }
    }
}

/// Session middleware for mutating endpoints, bypassed in demo mode
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.demo_mode {
        return next.run(request).await;
    }
    session_middleware(State(state), request, next).await
}

/// Headers set on every response
const SECURITY_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; \
         img-src 'self' blob: data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'",
    ),
];

/// CORS for the dashboard: same-origin only unless origins are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    if allowed_origins.is_empty() {
        return cors;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// `{"ok": true}` acknowledgement
#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Create the application router
pub fn create_router(store: Store, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        store,
        config: config.clone(),
    });

    let open_routes = Router::new()
        .route("/login", post(handlers::login))
        .route("/ping", get(handlers::ping))
        .route("/clients", get(handlers::list_clients))
        .route("/expenses", get(handlers::list_expenses))
        .route("/expenses/export", get(handlers::export_expenses))
        .route("/finance/stats", get(handlers::get_finance_stats))
        .route("/insights", get(handlers::get_insights))
        .route("/alerts", get(handlers::list_alerts))
        .route("/assistant/chat", post(handlers::chat));

    let guarded_routes = Router::new()
        .route("/clients", post(handlers::create_client))
        .route(
            "/upload-invoice",
            post(handlers::upload_invoice)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + MULTIPART_OVERHEAD)),
        )
        .route("/agents/activate", post(handlers::activate_agent))
        .route("/alerts/:id/read", post(handlers::mark_alert_read))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let session_routes = Router::new()
        .route("/me", get(handlers::get_me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    // Method routers on a shared path (GET/POST /clients) are combined on merge
    let api_routes = open_routes.merge(guarded_routes).merge(session_routes);

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins));
    for (name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    // Serve the dashboard build if provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    store: Store,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.demo_mode {
        warn!("⚠️  Demo mode on - mutating endpoints accept requests without a session");
    }

    if config.schedule.enabled {
        start_alert_scheduler(store.clone(), config.schedule.jobs()?);
    } else {
        info!("Alert scheduler disabled");
    }

    let app = create_router(store, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
