//! # Question API
//!
//! CRUD over `/api/v1/question`. Handlers parse input, delegate to the
//! [`QuestionRepository`](crate::repository::QuestionRepository), and wrap
//! the result in the success or error envelope.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use questions_core::{NewQuestion, Question, QuestionId, QuestionPatch};

use crate::error::{RouteContext, RouteError};
use crate::extractors::{extract_json, extract_path, extract_query};
use crate::repository::QuestionFilter;
use crate::response::ApiResponse;
use crate::state::AppState;

pub const FETCH_QUESTIONS: RouteContext =
    RouteContext::new("fetching Questions", "routes.question.fetchQuestions");
pub const CREATE_QUESTION: RouteContext =
    RouteContext::new("creating Question", "routes.question.createQuestion");
pub const FETCH_QUESTION: RouteContext =
    RouteContext::new("fetching Question", "routes.question.fetchQuestion");
pub const UPDATE_QUESTION: RouteContext =
    RouteContext::new("updating Question", "routes.question.updateQuestion");
pub const DELETE_QUESTION: RouteContext =
    RouteContext::new("deleting Question", "routes.question.deleteQuestion");

/// Build the question router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/question",
            get(list_questions).post(create_question),
        )
        .route(
            "/api/v1/question/{id}",
            get(get_question)
                .put(update_question)
                .delete(delete_question),
        )
}

/// GET /api/v1/question: List questions, optionally filtered by type.
#[utoipa::path(
    get,
    path = "/api/v1/question",
    params(QuestionFilter),
    responses(
        (status = 200, description = "Questions fetched", body = crate::response::QuestionListEnvelope),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorBody),
    ),
    tag = "question"
)]
pub(crate) async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<QuestionFilter>, QueryRejection>,
) -> Result<ApiResponse<Vec<Question>>, RouteError> {
    let env = state.config.env;
    let filter = extract_query(query).map_err(|e| FETCH_QUESTIONS.error(env, e))?;
    let questions = state.questions.find_all(filter);
    Ok(ApiResponse::ok("Questions fetched", questions))
}

/// POST /api/v1/question: Create a question.
#[utoipa::path(
    post,
    path = "/api/v1/question",
    request_body = NewQuestion,
    responses(
        (status = 200, description = "A New Question was created", body = crate::response::QuestionEnvelope),
        (status = 400, description = "Validation failed or malformed body", body = crate::error::ErrorBody),
    ),
    tag = "question"
)]
pub(crate) async fn create_question(
    State(state): State<AppState>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<ApiResponse<Question>, RouteError> {
    let env = state.config.env;
    let new = extract_json(body).map_err(|e| CREATE_QUESTION.error(env, e))?;
    let question = state
        .questions
        .create(new)
        .await
        .map_err(|e| CREATE_QUESTION.error(env, e))?;
    Ok(ApiResponse::ok("A New Question was created", question))
}

/// GET /api/v1/question/{id}: Fetch one question.
#[utoipa::path(
    get,
    path = "/api/v1/question/{id}",
    params(("id" = i64, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question fetched", body = crate::response::QuestionEnvelope),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "question"
)]
pub(crate) async fn get_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Question>, RouteError> {
    let env = state.config.env;
    let id = QuestionId(extract_path(path).map_err(|e| FETCH_QUESTION.error(env, e))?);
    let question = state
        .questions
        .find_by_id(id)
        .map_err(|e| FETCH_QUESTION.error(env, e))?;
    Ok(ApiResponse::ok(format!("Question {id} fetched"), question))
}

/// PUT /api/v1/question/{id}: Partially update a question.
#[utoipa::path(
    put,
    path = "/api/v1/question/{id}",
    params(("id" = i64, Path, description = "Question ID")),
    request_body = QuestionPatch,
    responses(
        (status = 200, description = "A Question was updated", body = crate::response::QuestionEnvelope),
        (status = 400, description = "Validation failed or malformed body", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "question"
)]
pub(crate) async fn update_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<QuestionPatch>, JsonRejection>,
) -> Result<ApiResponse<Question>, RouteError> {
    let env = state.config.env;
    let id = QuestionId(extract_path(path).map_err(|e| UPDATE_QUESTION.error(env, e))?);
    let patch = extract_json(body).map_err(|e| UPDATE_QUESTION.error(env, e))?;
    let question = state
        .questions
        .update(id, patch)
        .await
        .map_err(|e| UPDATE_QUESTION.error(env, e))?;
    Ok(ApiResponse::ok("A Question was updated", question))
}

/// DELETE /api/v1/question/{id}: Delete a question.
#[utoipa::path(
    delete,
    path = "/api/v1/question/{id}",
    params(("id" = i64, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question deleted", body = crate::response::QuestionEnvelope),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "question"
)]
pub(crate) async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Question>, RouteError> {
    let env = state.config.env;
    let id = QuestionId(extract_path(path).map_err(|e| DELETE_QUESTION.error(env, e))?);
    let question = state
        .questions
        .delete(id)
        .await
        .map_err(|e| DELETE_QUESTION.error(env, e))?;
    Ok(ApiResponse::ok(
        format!("The question with ID {id} was deleted"),
        question,
    ))
}
