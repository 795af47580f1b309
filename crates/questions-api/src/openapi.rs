//! # OpenAPI Document Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served unauthenticated at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Questions API",
        description = "CRUD for dissertative and objective quiz questions, with keyword-weight and single-correct-answer validation.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::question::list_questions,
        crate::routes::question::create_question,
        crate::routes::question::get_question,
        crate::routes::question::update_question,
        crate::routes::question::delete_question,
    ),
    components(schemas(
        questions_core::Question,
        questions_core::QuestionId,
        questions_core::QuestionType,
        questions_core::NewQuestion,
        questions_core::QuestionPatch,
        crate::response::QuestionEnvelope,
        crate::response::QuestionListEnvelope,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "question", description = "Question CRUD"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI document.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
