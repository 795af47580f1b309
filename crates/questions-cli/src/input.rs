//! Parsing of the free-text answer formats and of update answers.
//!
//! Key words are entered as
//! `Key Word: Software Engineering; Value: 0.5 .. Key Word: SWEBOK; Value: 0.5`
//! and alternatives as
//! `Alternative: One; Value: true .. Alternative: Two; Value: false`.
//! Segments are separated by `..`. A segment without exactly one `;` is
//! skipped.

use anyhow::{bail, Result};
use questions_core::{Alternatives, KeyWords, QuestionPatch, QuestionType};

const KEY_WORD_LABEL: &str = "Key Word:";
const ALTERNATIVE_LABEL: &str = "Alternative:";
const VALUE_LABEL: &str = "Value:";

/// Example shown next to the key word prompt.
pub const KEY_WORDS_EXAMPLE: &str =
    "Key Word: Software Engineering; Value: 0.5 .. Key Word: SWEBOK; Value: 0.5";

/// Example shown next to the alternatives prompt.
pub const ALTERNATIVES_EXAMPLE: &str =
    "Alternative: Alternative One; Value: true .. Alternative: Alternative Two; Value: false";

/// Split `input` into `(label, raw value)` pairs.
fn segments<'a>(input: &'a str, label_prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
    input.split("..").filter_map(move |segment| {
        let mut parts = segment.split(';');
        let (label, value) = (parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let label = strip_label(label, label_prefix);
        if label.is_empty() {
            return None;
        }
        Some((label, strip_label(value, VALUE_LABEL)))
    })
}

fn strip_label<'a>(text: &'a str, prefix: &str) -> &'a str {
    let text = text.trim();
    text.strip_prefix(prefix).unwrap_or(text).trim()
}

/// Parse the key word answer format.
///
/// Every value must be a finite number; all offending key words are named
/// in the error.
pub fn parse_key_words(input: &str) -> Result<KeyWords> {
    let mut key_words = KeyWords::new();
    let mut invalid = Vec::new();

    for (label, raw) in segments(input, KEY_WORD_LABEL) {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                key_words.insert(label.to_string(), value);
            }
            _ => invalid.push(format!("Key Word: {label}, has a invalid Value")),
        }
    }

    if !invalid.is_empty() {
        bail!(invalid.join("\n"));
    }
    if key_words.is_empty() {
        bail!("Insert at least one valid Key word");
    }
    Ok(key_words)
}

/// Parse the alternatives answer format. Only the literal `true` marks an
/// alternative as correct.
pub fn parse_alternatives(input: &str) -> Result<Alternatives> {
    let alternatives: Alternatives = segments(input, ALTERNATIVE_LABEL)
        .map(|(label, raw)| (label.to_string(), raw == "true"))
        .collect();

    if alternatives.is_empty() {
        bail!("Insert at least one valid Alternative");
    }
    Ok(alternatives)
}

/// What the user chose to change on an existing question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateAnswers {
    pub description: Option<String>,
    /// Switch to the other question type.
    pub switch_type: bool,
    pub key_words: Option<KeyWords>,
    pub alternatives: Option<Alternatives>,
}

impl UpdateAnswers {
    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && !self.switch_type
            && self.key_words.is_none()
            && self.alternatives.is_none()
    }
}

/// Turn update answers into the patch sent to the API.
///
/// Switching type requires the new type's sub-document and clears the old
/// one. Editing the old type's sub-document while switching is rejected,
/// as is editing a sub-document that does not belong to the current type.
pub fn build_patch(current: QuestionType, answers: UpdateAnswers) -> Result<QuestionPatch> {
    if answers.is_empty() {
        bail!("Select one field");
    }

    let mut patch = QuestionPatch {
        description: answers.description,
        ..QuestionPatch::default()
    };

    if answers.switch_type {
        let target = current.other();
        match target {
            QuestionType::Objective => {
                if answers.key_words.is_some() {
                    bail!("Cannot change Type and Key Words at the same time");
                }
                let Some(alternatives) = answers.alternatives else {
                    bail!("Changing to Objective requires Alternatives");
                };
                patch.alternatives = Some(Some(alternatives));
                patch.key_words = Some(None);
            }
            QuestionType::Dissertative => {
                if answers.alternatives.is_some() {
                    bail!("Cannot change Type and Alternatives at the same time");
                }
                let Some(key_words) = answers.key_words else {
                    bail!("Changing to Dissertative requires Key Words");
                };
                patch.key_words = Some(Some(key_words));
                patch.alternatives = Some(None);
            }
        }
        patch.question_type = Some(target);
        return Ok(patch);
    }

    match current {
        QuestionType::Dissertative if answers.alternatives.is_some() => {
            bail!("Alternatives only apply to objective questions")
        }
        QuestionType::Objective if answers.key_words.is_some() => {
            bail!("Key Words only apply to dissertative questions")
        }
        _ => {}
    }
    patch.key_words = answers.key_words.map(Some);
    patch.alternatives = answers.alternatives.map(Some);
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_key_word_example() {
        let key_words = parse_key_words(KEY_WORDS_EXAMPLE).unwrap();
        assert_eq!(key_words.len(), 2);
        assert_eq!(key_words.get("Software Engineering"), Some(&0.5));
        assert_eq!(key_words.get("SWEBOK"), Some(&0.5));
    }

    #[test]
    fn key_words_without_spaces_around_separator() {
        let key_words = parse_key_words("Key Word: a; Value: 0.25..Key Word: b; Value: 0.75").unwrap();
        assert_eq!(key_words.get("a"), Some(&0.25));
        assert_eq!(key_words.get("b"), Some(&0.75));
    }

    #[test]
    fn segment_without_single_semicolon_is_skipped() {
        let key_words =
            parse_key_words("Key Word: a; Value: 1 .. garbage .. x; y; z").unwrap();
        assert_eq!(key_words.len(), 1);
        assert_eq!(key_words.get("a"), Some(&1.0));
    }

    #[test]
    fn non_numeric_value_names_the_key_word() {
        let err = parse_key_words("Key Word: a; Value: half .. Key Word: b; Value: 0.5")
            .unwrap_err()
            .to_string();
        assert!(err.contains("Key Word: a, has a invalid Value"));
        assert!(!err.contains("Key Word: b"));
    }

    #[test]
    fn empty_key_word_input_is_rejected() {
        let err = parse_key_words("nothing useful").unwrap_err().to_string();
        assert_eq!(err, "Insert at least one valid Key word");
    }

    #[test]
    fn parses_documented_alternatives_example() {
        let alternatives = parse_alternatives(ALTERNATIVES_EXAMPLE).unwrap();
        assert_eq!(alternatives.get("Alternative One"), Some(&true));
        assert_eq!(alternatives.get("Alternative Two"), Some(&false));
    }

    #[test]
    fn only_literal_true_is_correct() {
        let alternatives =
            parse_alternatives("Alternative: A; Value: True .. Alternative: B; Value: yes").unwrap();
        assert_eq!(alternatives.get("A"), Some(&false));
        assert_eq!(alternatives.get("B"), Some(&false));
    }

    #[test]
    fn empty_alternatives_input_is_rejected() {
        assert!(parse_alternatives("").is_err());
    }

    #[test]
    fn nothing_selected_is_rejected() {
        let err = build_patch(QuestionType::Objective, UpdateAnswers::default()).unwrap_err();
        assert_eq!(err.to_string(), "Select one field");
    }

    #[test]
    fn description_only_update() {
        let patch = build_patch(
            QuestionType::Objective,
            UpdateAnswers {
                description: Some("New text".into()),
                ..UpdateAnswers::default()
            },
        )
        .unwrap();
        assert!(patch.is_description_only());
    }

    #[test]
    fn switch_to_objective_sets_alternatives_and_clears_key_words() {
        let alternatives = parse_alternatives("Alternative: A; Value: true").unwrap();
        let patch = build_patch(
            QuestionType::Dissertative,
            UpdateAnswers {
                switch_type: true,
                alternatives: Some(alternatives.clone()),
                ..UpdateAnswers::default()
            },
        )
        .unwrap();
        assert_eq!(patch.question_type, Some(QuestionType::Objective));
        assert_eq!(patch.alternatives, Some(Some(alternatives)));
        assert_eq!(patch.key_words, Some(None));
    }

    #[test]
    fn switch_without_new_sub_document_is_rejected() {
        let err = build_patch(
            QuestionType::Objective,
            UpdateAnswers {
                switch_type: true,
                ..UpdateAnswers::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("requires Key Words"));
    }

    #[test]
    fn switch_while_editing_old_sub_document_is_rejected() {
        let err = build_patch(
            QuestionType::Dissertative,
            UpdateAnswers {
                switch_type: true,
                key_words: Some(parse_key_words("Key Word: a; Value: 1").unwrap()),
                alternatives: Some(parse_alternatives("Alternative: A; Value: true").unwrap()),
                ..UpdateAnswers::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot change Type and Key Words at the same time"
        );
    }

    #[test]
    fn editing_sub_document_of_other_type_is_rejected() {
        let err = build_patch(
            QuestionType::Objective,
            UpdateAnswers {
                key_words: Some(parse_key_words("Key Word: a; Value: 1").unwrap()),
                ..UpdateAnswers::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("only apply to dissertative"));
    }

    #[test]
    fn editing_own_sub_document_keeps_type() {
        let key_words = parse_key_words("Key Word: a; Value: 1").unwrap();
        let patch = build_patch(
            QuestionType::Dissertative,
            UpdateAnswers {
                key_words: Some(key_words.clone()),
                ..UpdateAnswers::default()
            },
        )
        .unwrap();
        assert_eq!(patch.question_type, None);
        assert_eq!(patch.key_words, Some(Some(key_words)));
        assert_eq!(patch.alternatives, None);
    }
}
