//! # Question Repository
//!
//! The single gateway for question persistence. Every write is validated
//! with `questions-core` before it touches the store, and is written
//! through to Postgres when a pool is configured.
//!
//! ## Write path
//!
//! Writes are serialized by a repository-wide lock, held across the
//! database round-trip.
//!
//! 1. Validate the candidate (create) or the merged patch (update).
//! 2. Write through to Postgres. On failure nothing changes in memory and
//!    [`RepositoryError::Storage`] is returned.
//! 3. Apply the change to the in-memory [`Store`].
//!
//! A row that is in memory but missing from Postgres is dropped from the
//! store and reported as [`RepositoryError::NotFound`].
//!
//! Ids come from a monotonically increasing sequence. After hydration the
//! sequence resumes above the highest stored id.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use questions_core::{
    validate_patch, validate_question, NewQuestion, Question, QuestionId, QuestionPatch,
    QuestionType, ValidationErrors,
};
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::Mutex;
use utoipa::IntoParams;

use crate::db;
use crate::state::Store;

/// Repository failures.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The candidate violates one or more validation rules. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Question {0} not found")]
    NotFound(QuestionId),

    /// The database write-through failed. The in-memory store is unchanged.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Filter for [`QuestionRepository::find_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionFilter {
    /// Only questions of this type.
    #[serde(rename = "type", default)]
    pub question_type: Option<QuestionType>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        self.question_type
            .map_or(true, |wanted| question.question_type == wanted)
    }
}

/// Handle to the question collection.
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    store: Store<Question>,
    next_id: Arc<AtomicI64>,
    pool: Option<PgPool>,
    writes: Arc<Mutex<()>>,
}

impl QuestionRepository {
    /// Create an empty repository. With `Some(pool)`, writes go through to Postgres.
    pub fn new(pool: Option<PgPool>) -> Self {
        Self {
            store: Store::new(),
            next_id: Arc::new(AtomicI64::new(1)),
            pool,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Load every persisted question into the in-memory store and move the
    /// id sequence past the highest id. Returns the number loaded.
    pub async fn hydrate(&self) -> Result<usize, RepositoryError> {
        let Some(pool) = &self.pool else {
            return Ok(0);
        };

        let questions = db::questions::load_all(pool)
            .await
            .map_err(|e| RepositoryError::Storage(format!("failed to load questions: {e}")))?;
        let count = questions.len();
        for question in questions {
            self.store.insert(question.id, question);
        }
        if let Some(max) = self.store.max_key() {
            self.next_id.fetch_max(max.get() + 1, Ordering::SeqCst);
        }
        Ok(count)
    }

    /// Validate and store a new question.
    pub async fn create(&self, new: NewQuestion) -> Result<Question, RepositoryError> {
        validate_question(&new.view())?;

        let _writer = self.writes.lock().await;
        let id = QuestionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let question = Question::from_new(id, new, Utc::now());

        if let Some(pool) = &self.pool {
            if let Err(e) = db::questions::insert(pool, &question).await {
                tracing::error!(question_id = %id, error = %e, "failed to persist question to database");
                return Err(RepositoryError::Storage(
                    "question could not be persisted".to_string(),
                ));
            }
        }
        self.store.insert(id, question.clone());

        tracing::info!(
            question_id = %id,
            question_type = %question.question_type,
            "question created"
        );
        Ok(question)
    }

    /// All questions matching `filter`, by ascending id.
    pub fn find_all(&self, filter: QuestionFilter) -> Vec<Question> {
        self.store.list_where(|q| filter.matches(q))
    }

    pub fn find_by_id(&self, id: QuestionId) -> Result<Question, RepositoryError> {
        self.store.get(&id).ok_or(RepositoryError::NotFound(id))
    }

    /// Merge `patch` over the stored question, validate, and store the result.
    ///
    /// On any validation or storage failure the stored record is left unchanged.
    pub async fn update(
        &self,
        id: QuestionId,
        patch: QuestionPatch,
    ) -> Result<Question, RepositoryError> {
        let _writer = self.writes.lock().await;
        let stored = self.find_by_id(id)?;
        let updated = patch.apply_to(&stored, Utc::now());
        validate_patch(&patch, &updated.view())?;

        if let Some(pool) = &self.pool {
            match db::questions::update(pool, &updated).await {
                Ok(true) => {}
                Ok(false) => return Err(self.evict_missing(id)),
                Err(e) => {
                    tracing::error!(question_id = %id, error = %e, "failed to persist question update");
                    return Err(RepositoryError::Storage(
                        "question update could not be persisted".to_string(),
                    ));
                }
            }
        }
        self.store.insert(id, updated.clone());

        tracing::info!(question_id = %id, "question updated");
        Ok(updated)
    }

    /// Remove a question, returning the removed record.
    pub async fn delete(&self, id: QuestionId) -> Result<Question, RepositoryError> {
        let _writer = self.writes.lock().await;
        let removed = self.find_by_id(id)?;

        if let Some(pool) = &self.pool {
            match db::questions::delete(pool, id).await {
                Ok(true) => {}
                Ok(false) => return Err(self.evict_missing(id)),
                Err(e) => {
                    tracing::error!(question_id = %id, error = %e, "failed to delete question from database");
                    return Err(RepositoryError::Storage(
                        "question deletion could not be persisted".to_string(),
                    ));
                }
            }
        }
        self.store.remove(&id);

        tracing::info!(question_id = %id, "question deleted");
        Ok(removed)
    }

    /// Drop a record that Postgres no longer has.
    fn evict_missing(&self, id: QuestionId) -> RepositoryError {
        self.store.remove(&id);
        tracing::warn!(question_id = %id, "question missing from database, dropped from store");
        RepositoryError::NotFound(id)
    }

    /// Number of stored questions.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
