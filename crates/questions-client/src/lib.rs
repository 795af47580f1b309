//! # questions-client: Typed HTTP client for the Questions API
//!
//! One method per endpoint of `/api/v1/question`. Every call returns the
//! server's success envelope ([`ApiResponse`]) so callers can show the
//! server's `description` alongside the body.
//!
//! Non-2xx responses become [`ClientError::Api`] carrying the error
//! envelope's `description`. Transport failures are retried with
//! exponential backoff before surfacing as [`ClientError::Http`]; a create
//! that timed out is not retried.

pub mod config;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use config::{ClientConfig, ConfigError, DEFAULT_API_URL};
pub use error::ClientError;
pub use types::{ApiErrorBody, ApiResponse};

use questions_core::{NewQuestion, Question, QuestionId, QuestionPatch, QuestionType};
use serde::de::DeserializeOwned;

use crate::retry::{retry_send, Idempotency};

/// Versioned prefix of the question resource.
const QUESTION_PATH: &str = "/api/v1/question";

/// Client for the Questions API.
#[derive(Debug, Clone)]
pub struct QuestionsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl QuestionsClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::Config(ConfigError::InvalidToken))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_build".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.api_url,
        })
    }

    /// Base URL the client sends requests to.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// `POST /api/v1/question`
    pub async fn create(
        &self,
        question: &NewQuestion,
    ) -> Result<ApiResponse<Question>, ClientError> {
        let endpoint = format!("POST {QUESTION_PATH}");
        let url = self.url(QUESTION_PATH);
        self.execute(endpoint, Idempotency::NonIdempotent, || {
            self.http.post(&url).json(question).send()
        })
        .await
    }

    /// `GET /api/v1/question`, optionally filtered by type.
    pub async fn list(
        &self,
        question_type: Option<QuestionType>,
    ) -> Result<ApiResponse<Vec<Question>>, ClientError> {
        let endpoint = format!("GET {QUESTION_PATH}");
        let url = self.url(QUESTION_PATH);
        self.execute(endpoint, Idempotency::Idempotent, || {
            let req = self.http.get(&url);
            let req = match question_type {
                Some(t) => req.query(&[("type", t.as_str())]),
                None => req,
            };
            req.send()
        })
        .await
    }

    /// `GET /api/v1/question/{id}`
    pub async fn get(&self, id: QuestionId) -> Result<ApiResponse<Question>, ClientError> {
        let path = format!("{QUESTION_PATH}/{id}");
        let url = self.url(&path);
        self.execute(format!("GET {path}"), Idempotency::Idempotent, || {
            self.http.get(&url).send()
        })
        .await
    }

    /// `PUT /api/v1/question/{id}`
    pub async fn update(
        &self,
        id: QuestionId,
        patch: &QuestionPatch,
    ) -> Result<ApiResponse<Question>, ClientError> {
        let path = format!("{QUESTION_PATH}/{id}");
        let url = self.url(&path);
        self.execute(format!("PUT {path}"), Idempotency::Idempotent, || {
            self.http.put(&url).json(patch).send()
        })
        .await
    }

    /// `DELETE /api/v1/question/{id}`. The body is the removed question.
    pub async fn delete(&self, id: QuestionId) -> Result<ApiResponse<Question>, ClientError> {
        let path = format!("{QUESTION_PATH}/{id}");
        let url = self.url(&path);
        self.execute(format!("DELETE {path}"), Idempotency::Idempotent, || {
            self.http.delete(&url).send()
        })
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn execute<T, F, Fut>(
        &self,
        endpoint: String,
        idempotency: Idempotency,
        send: F,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        T: DeserializeOwned,
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let resp = retry_send(idempotency, send)
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let description = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|envelope| envelope.description)
                .unwrap_or_else(|_| body.clone());
            tracing::debug!(%endpoint, status = status.as_u16(), "Questions API returned an error");
            return Err(ClientError::Api {
                endpoint,
                status: status.as_u16(),
                description,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| ClientError::Deserialization { endpoint, source: e })
    }
}
