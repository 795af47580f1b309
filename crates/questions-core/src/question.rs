//! # Question Domain Types
//!
//! The [`Question`] record, its creation payload [`NewQuestion`], and the
//! partial update [`QuestionPatch`]. All three serialize with camelCase
//! field names and `type` for the question variant.
//!
//! Sub-documents keep the order in which their entries were received, so
//! keyword weights are summed in that order and responses echo it back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseQuestionTypeError;

/// Keyword label to grading weight.
pub type KeyWords = IndexMap<String, f64>;

/// Alternative label to whether it is the correct answer.
pub type Alternatives = IndexMap<String, bool>;

/// System-assigned question identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct QuestionId(pub i64);

impl QuestionId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for QuestionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// The two question variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Free-text answer graded by weighted key words.
    Dissertative,
    /// Multiple choice with exactly one correct alternative.
    Objective,
}

impl QuestionType {
    /// All variants, in display order.
    pub const ALL: [QuestionType; 2] = [Self::Dissertative, Self::Objective];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dissertative => "dissertative",
            Self::Objective => "objective",
        }
    }

    /// The other variant.
    pub fn other(&self) -> Self {
        match self {
            Self::Dissertative => Self::Objective,
            Self::Objective => Self::Dissertative,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ParseQuestionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dissertative" => Ok(Self::Dissertative),
            "objective" => Ok(Self::Objective),
            _ => Err(ParseQuestionTypeError(s.to_string())),
        }
    }
}

/// A stored question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub description: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub key_words: Option<KeyWords>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub alternatives: Option<Alternatives>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Build a record from a creation payload. Both timestamps are `now`.
    pub fn from_new(id: QuestionId, new: NewQuestion, now: DateTime<Utc>) -> Self {
        Self {
            id,
            description: new.description,
            question_type: new.question_type,
            key_words: new.key_words,
            alternatives: new.alternatives,
            created_at: now,
            updated_at: now,
        }
    }

    /// Borrowed view used by the validation rules.
    pub fn view(&self) -> QuestionView<'_> {
        QuestionView {
            description: &self.description,
            question_type: self.question_type,
            key_words: self.key_words.as_ref(),
            alternatives: self.alternatives.as_ref(),
        }
    }
}

/// Payload for creating a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub description: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub key_words: Option<KeyWords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub alternatives: Option<Alternatives>,
}

impl NewQuestion {
    pub fn view(&self) -> QuestionView<'_> {
        QuestionView {
            description: &self.description,
            question_type: self.question_type,
            key_words: self.key_words.as_ref(),
            alternatives: self.alternatives.as_ref(),
        }
    }
}

/// Partial update of a question.
///
/// The outer `Option` on the sub-documents means "supplied"; the inner one
/// means "set" versus "cleared". A JSON `null` therefore clears the field,
/// while an absent key leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuestionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub key_words: Option<Option<KeyWords>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub alternatives: Option<Option<Alternatives>>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl QuestionPatch {
    /// No field supplied.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.question_type.is_none()
            && self.key_words.is_none()
            && self.alternatives.is_none()
    }

    /// Only `description` supplied.
    pub fn is_description_only(&self) -> bool {
        self.description.is_some()
            && self.question_type.is_none()
            && self.key_words.is_none()
            && self.alternatives.is_none()
    }

    /// Merge this patch over `stored`, stamping `updated_at` with `now`.
    ///
    /// Identity and `created_at` are always carried over from `stored`.
    pub fn apply_to(&self, stored: &Question, now: DateTime<Utc>) -> Question {
        Question {
            id: stored.id,
            description: self
                .description
                .clone()
                .unwrap_or_else(|| stored.description.clone()),
            question_type: self.question_type.unwrap_or(stored.question_type),
            key_words: match &self.key_words {
                Some(value) => value.clone(),
                None => stored.key_words.clone(),
            },
            alternatives: match &self.alternatives {
                Some(value) => value.clone(),
                None => stored.alternatives.clone(),
            },
            created_at: stored.created_at,
            updated_at: now,
        }
    }
}

/// Borrowed candidate state checked by the validation rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionView<'a> {
    pub description: &'a str,
    pub question_type: QuestionType,
    pub key_words: Option<&'a KeyWords>,
    pub alternatives: Option<&'a Alternatives>,
}
