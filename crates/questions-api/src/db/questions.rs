//! Question persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `questions` table.
//! Sub-documents are stored as `JSON` text so their key order survives a
//! round-trip; `JSONB` would reorder it and change the keyword sum.

use chrono::{DateTime, Utc};
use questions_core::{Question, QuestionId, QuestionType};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;

fn to_json_text<T: Serialize>(value: Option<&T>) -> Result<Option<String>, sqlx::Error> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn from_json_text<T: DeserializeOwned>(text: Option<&str>) -> Result<Option<T>, serde_json::Error> {
    text.map(serde_json::from_str).transpose()
}

/// Insert a new question record.
pub async fn insert(pool: &PgPool, record: &Question) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO questions (id, description, type, key_words, alternatives,
         created_at, updated_at)
         VALUES ($1, $2, $3, $4::json, $5::json, $6, $7)",
    )
    .bind(record.id.get())
    .bind(&record.description)
    .bind(record.question_type.as_str())
    .bind(to_json_text(record.key_words.as_ref())?)
    .bind(to_json_text(record.alternatives.as_ref())?)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrite every mutable column of an existing question.
///
/// Returns `false` when no row has the record's id.
pub async fn update(pool: &PgPool, record: &Question) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE questions SET description = $1, type = $2, key_words = $3::json,
         alternatives = $4::json, updated_at = $5 WHERE id = $6",
    )
    .bind(&record.description)
    .bind(record.question_type.as_str())
    .bind(to_json_text(record.key_words.as_ref())?)
    .bind(to_json_text(record.alternatives.as_ref())?)
    .bind(record.updated_at)
    .bind(record.id.get())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a question. Returns `false` when no row matched.
pub async fn delete(pool: &PgPool, id: QuestionId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id.get())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all questions, by ascending id, for hydrating the in-memory store.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
    let rows = sqlx::query_as::<_, QuestionRow>(
        "SELECT id, description, type AS question_type,
         key_words::text AS key_words, alternatives::text AS alternatives,
         created_at, updated_at
         FROM questions ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(record) = row.into_record() {
            records.push(record);
        }
    }
    Ok(records)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    description: String,
    question_type: String,
    key_words: Option<String>,
    alternatives: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuestionRow {
    fn into_record(self) -> Option<Question> {
        let question_type = match self.question_type.parse::<QuestionType>() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(question_id = self.id, error = %e, "skipping question row with invalid type");
                return None;
            }
        };

        let sub_documents = from_json_text(self.key_words.as_deref())
            .and_then(|k| Ok((k, from_json_text(self.alternatives.as_deref())?)));
        let (key_words, alternatives) = match sub_documents {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(question_id = self.id, error = %e, "skipping question row with malformed sub-document");
                return None;
            }
        };

        Some(Question {
            id: QuestionId(self.id),
            description: self.description,
            question_type,
            key_words,
            alternatives,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
