//! # Authentication Middleware
//!
//! Static bearer token authentication for the `/api/v1/*` routes. Health
//! probes and the OpenAPI document are mounted outside this middleware.
//!
//! When no token is configured, authentication is disabled and every
//! request passes through.

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::error::ErrorBody;
use crate::state::AppEnv;

const UNAUTHENTICATED: &str = "User not authenticated";
const AUTH_CODE: &str = "lib.middlawares.verifyAuthentication";

/// Expected token and environment, read by [`auth_middleware`] from the
/// request extensions. `Debug` never prints the token.
#[derive(Clone)]
pub struct AuthConfig {
    pub token: Option<String>,
    /// Decides whether 401 envelopes carry `error` and `code`.
    pub env: AppEnv,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("env", &self.env)
            .finish()
    }
}

/// Compare tokens without an early exit on the first differing byte.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Validate the `Authorization: Bearer <token>` header against [`AuthConfig`].
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let config = request.extensions().get::<AuthConfig>().cloned();

    let Some(AuthConfig {
        token: Some(expected),
        env,
    }) = config
    else {
        return next.run(request).await;
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(provided) if constant_time_token_eq(provided.trim(), &expected) => {
                next.run(request).await
            }
            Some(_) => {
                tracing::warn!("authentication failed: invalid bearer token");
                unauthorized_response("invalid bearer token", env)
            }
            None => {
                tracing::warn!("authentication failed: non-Bearer authorization scheme");
                unauthorized_response("authorization header must use Bearer scheme", env)
            }
        },
        None => {
            tracing::warn!("authentication failed: missing authorization header");
            unauthorized_response("missing authorization header", env)
        }
    }
}

fn unauthorized_response(reason: &str, env: AppEnv) -> Response {
    ErrorBody::new(UNAUTHENTICATED, json!({ "message": reason }), AUTH_CODE, env)
        .into_response_with(StatusCode::UNAUTHORIZED)
}
