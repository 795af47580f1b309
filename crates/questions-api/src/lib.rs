//! # questions-api: Axum API Service for Quiz Questions
//!
//! Serves CRUD over the question collection. Every create and update is
//! checked by the validation rules in `questions-core` before it is stored.
//!
//! ## API Surface
//!
//! | Route | Module | Auth |
//! |-------|--------|------|
//! | `/api/v1/question`, `/api/v1/question/{id}` | [`routes::question`] | bearer, when `AUTH_TOKEN` is set |
//! | `/health/liveness`, `/health/readiness` | this module | none |
//! | `/openapi.json` | [`openapi`] | none |
//!
//! Unknown routes answer 404 with the error envelope.
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → BodyLimit → AuthMiddleware (api routes only) → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - No validation logic in route handlers; it lives in `questions-core`.
//! - All errors map to the structured envelope via [`error::RouteError`].

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::from_fn;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::auth::AuthConfig;
use crate::error::ErrorBody;

pub use error::{AppError, RouteError};
pub use repository::{QuestionRepository, RepositoryError};
pub use state::{AppConfig, AppEnv, AppState};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and the OpenAPI document are mounted outside the auth
/// middleware so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
        env: state.config.env,
    };

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::question::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(axum::Extension(auth_config));

    // Unauthenticated health probes.
    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(openapi::router())
        .merge(api)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 503 when a configured database is unreachable.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, (StatusCode, &'static str)> {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = db::ping(pool).await {
            tracing::warn!(error = %e, "readiness check failed: database unreachable");
            return Err((StatusCode::SERVICE_UNAVAILABLE, "database unavailable"));
        }
    }
    Ok("ready")
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    ErrorBody::new(
        "Not Found",
        json!({ "message": format!("no route for {}", uri.path()) }),
        "routes.notFound",
        state.config.env,
    )
    .into_response_with(StatusCode::NOT_FOUND)
}
