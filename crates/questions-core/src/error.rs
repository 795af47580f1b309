//! # Error Types
//!
//! Validation failures raised by the rules in [`crate::validation`], plus the
//! parse error for [`crate::QuestionType`]. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Each [`ValidationError`] variant carries a stable machine-readable code
//! (`INVALID_KEY_WORDS_SUM`, ...) and the wire name of the field it concerns,
//! so callers can report exactly which rule and field failed.

use std::fmt;

use thiserror::Error;

/// A single violated validation rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The keyword weights do not add up to exactly 1.
    #[error("The sum of the Key words value, must be 1. Got {sum}.")]
    InvalidKeyWordsSum {
        /// The computed sum, in received order.
        sum: f64,
    },

    /// A keyword weight is zero (or negative).
    #[error("Key words must have a value greater than 0. Key word '{key_word}' has {value}.")]
    InvalidKeyWordsValue {
        /// Label of the first offending keyword.
        key_word: String,
        /// Its weight.
        value: f64,
    },

    /// Not exactly one alternative is marked correct.
    #[error("There must one correct Alternative. Found {correct}.")]
    InvalidAlternativesCount {
        /// How many alternatives were marked correct.
        correct: usize,
    },

    /// A dissertative question without key words.
    #[error("Questions of type dissertative must have key words.")]
    MissingKeyWordsForDissertative,

    /// An objective question without alternatives.
    #[error("Questions of type objective must have alternatives.")]
    MissingAlternativesForObjective,

    /// The description is empty or whitespace only.
    #[error("Question description must not be empty.")]
    InvalidDescription,
}

impl ValidationError {
    /// Machine-readable code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidKeyWordsSum { .. } => "INVALID_KEY_WORDS_SUM",
            Self::InvalidKeyWordsValue { .. } => "INVALID_KEY_WORDS_VALUE",
            Self::InvalidAlternativesCount { .. } => "INVALID_ALTERNATIVES_COUNT",
            Self::MissingKeyWordsForDissertative => "MISSING_KEY_WORDS_FOR_DISSERTATIVE",
            Self::MissingAlternativesForObjective => "MISSING_ALTERNATIVES_FOR_OBJECTIVE",
            Self::InvalidDescription => "INVALID_DESCRIPTION",
        }
    }

    /// Wire name of the field the failure concerns.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidKeyWordsSum { .. }
            | Self::InvalidKeyWordsValue { .. }
            | Self::MissingKeyWordsForDissertative => "keyWords",
            Self::InvalidAlternativesCount { .. } | Self::MissingAlternativesForObjective => {
                "alternatives"
            }
            Self::InvalidDescription => "description",
        }
    }
}

/// Every rule violated by one candidate write, in evaluation order.
///
/// Never empty: it can only be built from at least one [`ValidationError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Wrap a list of failures. Returns `None` when the list is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The first violated rule.
    pub fn first(&self) -> &ValidationError {
        // Non-empty by construction.
        &self.errors[0]
    }

    /// Iterate over all violations.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether a violation with the given code was recorded.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code() == code)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self { errors: vec![err] }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation error: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Error parsing a [`crate::QuestionType`] from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown question type '{0}': expected 'dissertative' or 'objective'")]
pub struct ParseQuestionTypeError(pub String);
