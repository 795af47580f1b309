//! # Validation Core
//!
//! Pure predicates over a candidate question. Each field rule returns the
//! first violation it finds; [`validate_question`] runs every rule and
//! collects all violations, first violated rule first.
//!
//! Rule order for a full check:
//!
//! 1. type requirement (the sub-document the type needs is present and non-empty)
//! 2. description is not blank
//! 3. key words: every weight > 0, then weights sum to exactly 1
//! 4. alternatives: exactly one is correct
//!
//! The keyword sum is compared to `1.0` with exact floating-point equality,
//! adding the weights in the order they were received. Weights such as
//! `{0.7, 0.2, 0.1}` that add to 1 in decimal can therefore be rejected,
//! while the same weights received as `{0.1, 0.2, 0.7}` pass.

use crate::error::{ValidationError, ValidationErrors};
use crate::question::{Alternatives, KeyWords, QuestionPatch, QuestionType, QuestionView};

/// Check the keyword weights. Absent key words pass.
pub fn validate_key_words(key_words: Option<&KeyWords>) -> Result<(), ValidationError> {
    let Some(key_words) = key_words else {
        return Ok(());
    };

    // Written as a negation so NaN is rejected too.
    if let Some((label, value)) = key_words.iter().find(|(_, value)| !(**value > 0.0)) {
        return Err(ValidationError::InvalidKeyWordsValue {
            key_word: label.clone(),
            value: *value,
        });
    }

    let sum: f64 = key_words.values().sum();
    if sum != 1.0 {
        return Err(ValidationError::InvalidKeyWordsSum { sum });
    }
    Ok(())
}

/// Check that exactly one alternative is correct. Absent alternatives pass.
pub fn validate_alternatives(alternatives: Option<&Alternatives>) -> Result<(), ValidationError> {
    let Some(alternatives) = alternatives else {
        return Ok(());
    };

    let correct = alternatives.values().filter(|is_correct| **is_correct).count();
    if correct != 1 {
        return Err(ValidationError::InvalidAlternativesCount { correct });
    }
    Ok(())
}

/// Check that the sub-document required by the question type is present.
pub fn validate_type_requirements(view: &QuestionView<'_>) -> Result<(), ValidationError> {
    match view.question_type {
        QuestionType::Dissertative if view.key_words.map_or(true, |k| k.is_empty()) => {
            Err(ValidationError::MissingKeyWordsForDissertative)
        }
        QuestionType::Objective if view.alternatives.map_or(true, |a| a.is_empty()) => {
            Err(ValidationError::MissingAlternativesForObjective)
        }
        _ => Ok(()),
    }
}

/// Check that the description has visible text.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::InvalidDescription);
    }
    Ok(())
}

/// Run every rule over a full candidate.
pub fn validate_question(view: &QuestionView<'_>) -> Result<(), ValidationErrors> {
    let errors: Vec<ValidationError> = [
        validate_type_requirements(view),
        validate_description(view.description),
        validate_key_words(view.key_words),
        validate_alternatives(view.alternatives),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    match ValidationErrors::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

/// Validate an update given the patch and the merged result.
///
/// A description-only patch is checked by the description rule alone. A
/// patch touching `type`, `keyWords` or `alternatives` runs the full check
/// over the merged record. An empty patch passes.
pub fn validate_patch(
    patch: &QuestionPatch,
    merged: &QuestionView<'_>,
) -> Result<(), ValidationErrors> {
    if patch.is_empty() {
        return Ok(());
    }
    if patch.is_description_only() {
        return validate_description(merged.description).map_err(ValidationErrors::from);
    }
    validate_question(merged)
}
