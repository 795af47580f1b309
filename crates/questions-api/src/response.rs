//! # Success Envelope
//!
//! Every successful response has the shape
//! `{"description": string, "body": any, "success": true}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use questions_core::Question;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope wrapping a response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub description: String,
    pub body: T,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(description: impl Into<String>, body: T) -> Self {
        Self {
            description: description.into(),
            body,
            success: true,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// OpenAPI shape of an envelope carrying one question.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct QuestionEnvelope {
    description: String,
    body: Question,
    success: bool,
}

/// OpenAPI shape of an envelope carrying a list of questions.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct QuestionListEnvelope {
    description: String,
    body: Vec<Question>,
    success: bool,
}
