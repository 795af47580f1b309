//! HTTP contract tests for `QuestionsClient` against a wiremock server.

use questions_client::{ClientConfig, ClientError, QuestionsClient};
use questions_core::{NewQuestion, QuestionId, QuestionPatch, QuestionType};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> QuestionsClient {
    QuestionsClient::new(ClientConfig::with_url(&server.uri()).unwrap()).unwrap()
}

fn objective_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "description": "Which planet is largest?",
        "type": "objective",
        "alternatives": { "Earth": false, "Jupiter": true, "Mars": false },
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z"
    })
}

fn dissertative_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "description": "Explain photosynthesis",
        "type": "dissertative",
        "keyWords": { "chlorophyll": 0.5, "light": 0.25, "sugar": 0.25 },
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-02T00:00:00Z"
    })
}

fn envelope(description: &str, body: serde_json::Value) -> serde_json::Value {
    json!({ "description": description, "body": body, "success": true })
}

#[tokio::test]
async fn create_posts_question_and_returns_envelope() {
    let server = MockServer::start().await;
    let new: NewQuestion = serde_json::from_value(json!({
        "description": "Which planet is largest?",
        "type": "objective",
        "alternatives": { "Earth": false, "Jupiter": true, "Mars": false }
    }))
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/question"))
        .and(body_json(json!({
            "description": "Which planet is largest?",
            "type": "objective",
            "alternatives": { "Earth": false, "Jupiter": true, "Mars": false }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope("A New Question was created", objective_json(1))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server).create(&new).await.unwrap();
    assert_eq!(resp.description, "A New Question was created");
    assert!(resp.success);
    assert_eq!(resp.body.id, QuestionId(1));
    assert_eq!(resp.body.question_type, QuestionType::Objective);
    assert_eq!(
        resp.body.alternatives.as_ref().and_then(|a| a.get("Jupiter")),
        Some(&true)
    );
}

#[tokio::test]
async fn list_without_filter_returns_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/question"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            "Questions fetched",
            json!([objective_json(1), dissertative_json(2)]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server).list(None).await.unwrap();
    assert_eq!(resp.body.len(), 2);
    assert_eq!(resp.body[1].question_type, QuestionType::Dissertative);
}

#[tokio::test]
async fn list_with_type_sends_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/question"))
        .and(query_param("type", "dissertative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            "Questions fetched",
            json!([dissertative_json(2)]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .list(Some(QuestionType::Dissertative))
        .await
        .unwrap();
    assert_eq!(resp.body.len(), 1);
    let key_words = resp.body[0].key_words.as_ref().unwrap();
    assert_eq!(key_words.get("chlorophyll"), Some(&0.5));
}

#[tokio::test]
async fn get_fetches_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/question/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope("Question 2 fetched", dissertative_json(2))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server).get(QuestionId(2)).await.unwrap();
    assert_eq!(resp.description, "Question 2 fetched");
    assert_eq!(resp.body.description, "Explain photosynthesis");
}

#[tokio::test]
async fn get_missing_question_surfaces_server_description() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/question/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "description": "Error while fetching Question: Question 99 not found",
            "error": { "message": "Question 99 not found" },
            "code": "routes.question.getQuestion"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get(QuestionId(99)).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    assert_eq!(
        err.user_message(),
        "Error while fetching Question: Question 99 not found"
    );
    match err {
        ClientError::Api { endpoint, .. } => assert_eq!(endpoint, "GET /api/v1/question/99"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_envelope_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/question/5"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).delete(QuestionId(5)).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 502, .. }));
    assert_eq!(err.user_message(), "Bad Gateway");
}

#[tokio::test]
async fn update_sends_patch_with_explicit_null() {
    let server = MockServer::start().await;
    let patch: QuestionPatch = serde_json::from_value(json!({
        "type": "objective",
        "keyWords": null,
        "alternatives": { "Earth": false, "Jupiter": true, "Mars": false }
    }))
    .unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/v1/question/1"))
        .and(body_json(json!({
            "type": "objective",
            "keyWords": null,
            "alternatives": { "Earth": false, "Jupiter": true, "Mars": false }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope("A Question was updated", objective_json(1))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .update(QuestionId(1), &patch)
        .await
        .unwrap();
    assert_eq!(resp.body.question_type, QuestionType::Objective);
    assert!(resp.body.key_words.is_none());
}

#[tokio::test]
async fn update_rejected_by_validation_reports_description() {
    let server = MockServer::start().await;
    let patch: QuestionPatch =
        serde_json::from_value(json!({ "alternatives": { "A": true, "B": true } })).unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/v1/question/1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "description": "Error while updating Question: There must one correct Alternative. Found 2."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update(QuestionId(1), &patch)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert!(err.user_message().contains("There must one correct Alternative"));
}

#[tokio::test]
async fn delete_returns_removed_question() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/question/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            "The question with ID 1 was deleted",
            objective_json(1),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server).delete(QuestionId(1)).await.unwrap();
    assert_eq!(resp.description, "The question with ID 1 was deleted");
    assert_eq!(resp.body.id, QuestionId(1));
}

#[tokio::test]
async fn configured_token_is_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/question"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope("Questions fetched", json!([]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ClientConfig::with_url(&server.uri()).unwrap();
    config.api_token = Some("s3cret".into());
    let client = QuestionsClient::new(config).unwrap();

    let resp = client.list(None).await.unwrap();
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_deserialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/question/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get(QuestionId(3)).await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialization { .. }));
}
