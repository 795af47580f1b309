//! # API Error Types
//!
//! Structured error types implementing `axum::response::IntoResponse`.
//!
//! Every error response uses the same envelope:
//!
//! ```json
//! { "description": "Error while creating Question: ...", "error": {...}, "code": "routes.question.createQuestion" }
//! ```
//!
//! `error` and `code` are omitted in production. Internal error details are
//! only included in development; they are always logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use questions_core::ValidationErrors;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use utoipa::ToSchema;

use crate::repository::RepositoryError;
use crate::state::AppEnv;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Structured JSON error response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of what failed.
    pub description: String,
    /// Error detail. Omitted in production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// Tracking code of the failing route. Omitted in production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorBody {
    /// Build an envelope, dropping `error` and `code` where `env` hides them.
    pub fn new(description: impl Into<String>, error: Value, code: &str, env: AppEnv) -> Self {
        let expose = env.exposes_error_details();
        Self {
            description: description.into(),
            error: expose.then_some(error),
            code: expose.then(|| code.to_string()),
        }
    }

    /// Pair the envelope with a status code.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Application-level error type.
///
/// Carries no route information; handlers attach it with
/// [`RouteContext::error`] before returning.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more validation rules failed (400).
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Request could not be parsed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid credentials (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged, shown only in development.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Never contains internal details.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Value for the envelope's `error` member.
    fn detail(&self, env: AppEnv) -> Value {
        match self {
            Self::Validation(errors) => {
                let violations: Vec<Value> = errors
                    .iter()
                    .map(|e| {
                        json!({
                            "code": e.code(),
                            "field": e.field(),
                            "message": e.to_string(),
                        })
                    })
                    .collect();
                json!({ "violations": violations })
            }
            Self::Internal(msg) if env.is_development() => json!({ "message": msg }),
            other => json!({ "message": other.public_message() }),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(errors) => Self::Validation(errors),
            RepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            RepositoryError::Storage(msg) => Self::Internal(msg),
        }
    }
}

/// Identity of a route, used to phrase its error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContext {
    /// Completes "Error while ...", e.g. `"creating Question"`.
    pub action: &'static str,
    /// Tracking code, e.g. `"routes.question.createQuestion"`.
    pub code: &'static str,
}

impl RouteContext {
    pub const fn new(action: &'static str, code: &'static str) -> Self {
        Self { action, code }
    }

    /// Attach this route to an error.
    pub fn error(self, env: AppEnv, error: impl Into<AppError>) -> RouteError {
        RouteError {
            context: self,
            env,
            error: error.into(),
        }
    }
}

/// An [`AppError`] raised by a specific route. This is what handlers return.
#[derive(Debug)]
pub struct RouteError {
    context: RouteContext,
    env: AppEnv,
    error: AppError,
}

impl RouteError {
    /// The envelope this error renders to.
    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(
            format!(
                "Error while {}: {}",
                self.context.action,
                self.error.public_message()
            ),
            self.error.detail(self.env),
            self.context.code,
            self.env,
        )
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        match &self.error {
            AppError::Internal(_) => {
                tracing::error!(error = %self.error, code = self.context.code, "internal server error");
            }
            other => {
                tracing::debug!(error = %other, code = self.context.code, status = status.as_u16(), "request rejected");
            }
        }
        self.body().into_response_with(status)
    }
}
