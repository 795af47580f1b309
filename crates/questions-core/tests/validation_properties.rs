//! Property tests for the validation rules.
//!
//! Keyword weights are generated as dyadic partitions of 1 (repeatedly
//! halving an entry), so every partial sum is exact in binary floating
//! point and the expected verdict is known without tolerance.

use proptest::prelude::*;
use proptest::sample::Index;

use questions_core::{
    validate_alternatives, validate_key_words, validate_patch, validate_question, Alternatives,
    KeyWords, QuestionPatch, QuestionType, QuestionView, ValidationError,
};

/// Positive weights that sum to exactly 1.
fn dyadic_partition() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(any::<Index>(), 0..8).prop_map(|splits| {
        let mut parts = vec![1.0_f64];
        for idx in splits {
            let i = idx.index(parts.len());
            let half = parts[i] / 2.0;
            parts[i] = half;
            parts.push(half);
        }
        parts
    })
}

fn to_key_words(weights: &[f64]) -> KeyWords {
    weights
        .iter()
        .enumerate()
        .map(|(i, w)| (format!("Key Word {i:02}"), *w))
        .collect()
}

/// Alternatives with a chosen number of correct entries.
fn alternatives_with(total: usize, correct: usize) -> Alternatives {
    (0..total)
        .map(|i| (format!("Alternative {i:02}"), i < correct))
        .collect()
}

proptest! {
    /// Positive weights summing exactly to 1 always pass.
    #[test]
    fn partition_of_one_passes(weights in dyadic_partition()) {
        let kw = to_key_words(&weights);
        prop_assert!(validate_key_words(Some(&kw)).is_ok());
    }

    /// A zero weight fails on value, whatever the remaining weights add to.
    #[test]
    fn zero_weight_fails_on_value(
        weights in dyadic_partition(),
        at in any::<Index>(),
    ) {
        let mut weights = weights;
        let i = at.index(weights.len());
        weights[i] = 0.0;
        let kw = to_key_words(&weights);
        let err = validate_key_words(Some(&kw)).unwrap_err();
        prop_assert!(
            matches!(err, ValidationError::InvalidKeyWordsValue { value, .. } if value == 0.0),
            "unexpected error: {:?}", err
        );
    }

    /// Scaling one weight breaks the sum, and the rule reports it.
    #[test]
    fn scaled_weight_fails_on_sum(
        weights in dyadic_partition(),
        at in any::<Index>(),
    ) {
        let mut weights = weights;
        let i = at.index(weights.len());
        weights[i] *= 3.0;
        let kw = to_key_words(&weights);
        let err = validate_key_words(Some(&kw)).unwrap_err();
        prop_assert_eq!(err.code(), "INVALID_KEY_WORDS_SUM");
    }

    /// Exactly one correct alternative passes.
    #[test]
    fn one_correct_alternative_passes(total in 1usize..12) {
        let alts = alternatives_with(total, 1);
        prop_assert!(validate_alternatives(Some(&alts)).is_ok());
    }

    /// Zero or several correct alternatives fail with the observed count.
    #[test]
    fn other_correct_counts_fail(total in 0usize..12, correct in 0usize..12) {
        let correct = correct.min(total);
        prop_assume!(correct != 1);
        let alts = alternatives_with(total, correct);
        prop_assert_eq!(
            validate_alternatives(Some(&alts)).unwrap_err(),
            ValidationError::InvalidAlternativesCount { correct }
        );
    }

    /// A description-only patch passes regardless of stored sub-documents.
    #[test]
    fn description_only_patch_always_passes(
        description in "[A-Za-z][A-Za-z0-9 ?]{0,40}",
        weights in prop::collection::vec(-1.0f64..2.0, 0..5),
        correct in 0usize..4,
        objective in any::<bool>(),
    ) {
        let kw = to_key_words(&weights);
        let alts = alternatives_with(4, correct);
        let patch = QuestionPatch {
            description: Some(description.clone()),
            ..Default::default()
        };
        let merged = QuestionView {
            description: &description,
            question_type: if objective { QuestionType::Objective } else { QuestionType::Dissertative },
            key_words: Some(&kw),
            alternatives: Some(&alts),
        };
        prop_assert!(validate_patch(&patch, &merged).is_ok());
    }

    /// A full dissertative candidate with a valid partition passes.
    #[test]
    fn valid_dissertative_question_passes(weights in dyadic_partition()) {
        let kw = to_key_words(&weights);
        let view = QuestionView {
            description: "Explain ownership",
            question_type: QuestionType::Dissertative,
            key_words: Some(&kw),
            alternatives: None,
        };
        prop_assert!(validate_question(&view).is_ok());
    }
}

#[test]
fn decimal_weights_that_do_not_add_up_in_binary_are_rejected() {
    let kw: KeyWords = [("a", 0.6), ("b", 0.3), ("c", 0.1)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(
        validate_key_words(Some(&kw)).unwrap_err().code(),
        "INVALID_KEY_WORDS_SUM"
    );
}
