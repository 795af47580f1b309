//! Subcommand arguments and handlers.
//!
//! Each handler returns the process exit code: `0` when the API accepted
//! the request, `1` when it answered with an error. Input problems are
//! returned as `Err` and also end the process with `1`.

use anyhow::{bail, Context, Result};
use clap::Args;
use questions_client::{ApiResponse, ClientError, QuestionsClient};
use questions_core::{NewQuestion, QuestionId, QuestionType};
use serde::Serialize;

use crate::input::{build_patch, parse_alternatives, parse_key_words, UpdateAnswers};
use crate::output;
use crate::prompts;

/// Arguments for `questions create`.
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Question description.
    #[arg(long)]
    pub description: Option<String>,

    /// Question type: dissertative or objective.
    #[arg(long = "type")]
    pub question_type: Option<QuestionType>,

    /// Key words, e.g. "Key Word: A; Value: 0.5 .. Key Word: B; Value: 0.5".
    #[arg(long)]
    pub key_words: Option<String>,

    /// Alternatives, e.g. "Alternative: A; Value: true .. Alternative: B; Value: false".
    #[arg(long)]
    pub alternatives: Option<String>,
}

/// Arguments for `questions get`.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Question ID.
    pub id: i64,
}

/// Arguments for `questions get-all`.
#[derive(Args, Debug, Default)]
pub struct GetAllArgs {
    /// Only fetch questions of this type. Prompts when omitted.
    #[arg(long = "type", conflicts_with = "all")]
    pub question_type: Option<QuestionType>,

    /// Fetch every question without prompting.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for `questions update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Question ID.
    pub id: i64,

    /// New description.
    #[arg(long)]
    pub description: Option<String>,

    /// New type. Switching type requires the new type's key words or alternatives.
    #[arg(long = "type")]
    pub question_type: Option<QuestionType>,

    /// New key words.
    #[arg(long)]
    pub key_words: Option<String>,

    /// New alternatives.
    #[arg(long)]
    pub alternatives: Option<String>,
}

impl UpdateArgs {
    fn has_field_flags(&self) -> bool {
        self.description.is_some()
            || self.question_type.is_some()
            || self.key_words.is_some()
            || self.alternatives.is_some()
    }

    /// Answers taken from flags, relative to the stored type.
    fn answers(&self, current: QuestionType) -> Result<UpdateAnswers> {
        Ok(UpdateAnswers {
            description: self.description.clone(),
            switch_type: self.question_type.is_some_and(|t| t != current),
            key_words: self.key_words.as_deref().map(parse_key_words).transpose()?,
            alternatives: self
                .alternatives
                .as_deref()
                .map(parse_alternatives)
                .transpose()?,
        })
    }
}

/// Arguments for `questions delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Question ID.
    pub id: i64,
}

/// Create a question from flags, prompting for anything missing.
pub async fn run_create(args: &CreateArgs, client: &QuestionsClient) -> Result<u8> {
    let description = match &args.description {
        Some(d) if d.trim().is_empty() => bail!("Insert a valid description"),
        Some(d) => d.clone(),
        None => prompts::description()?,
    };
    let question_type = match args.question_type {
        Some(t) => t,
        None => prompts::question_type()?,
    };

    let new = match question_type {
        QuestionType::Dissertative => {
            if args.alternatives.is_some() {
                bail!("--alternatives only applies to objective questions");
            }
            let key_words = match &args.key_words {
                Some(raw) => parse_key_words(raw)?,
                None => prompts::key_words()?,
            };
            NewQuestion {
                description,
                question_type,
                key_words: Some(key_words),
                alternatives: None,
            }
        }
        QuestionType::Objective => {
            if args.key_words.is_some() {
                bail!("--key-words only applies to dissertative questions");
            }
            let alternatives = match &args.alternatives {
                Some(raw) => parse_alternatives(raw)?,
                None => prompts::alternatives()?,
            };
            NewQuestion {
                description,
                question_type,
                key_words: None,
                alternatives: Some(alternatives),
            }
        }
    };

    let pb = output::spinner("Creating question...");
    let result = client.create(&new).await;
    pb.finish_and_clear();
    Ok(report(result))
}

/// Fetch one question.
pub async fn run_get(args: &GetArgs, client: &QuestionsClient) -> Result<u8> {
    let pb = output::spinner("Fetching question...");
    let result = client.get(QuestionId(args.id)).await;
    pb.finish_and_clear();
    Ok(report(result))
}

/// Fetch all questions, optionally filtered by type.
pub async fn run_get_all(args: &GetAllArgs, client: &QuestionsClient) -> Result<u8> {
    let filter = match (args.all, args.question_type) {
        (true, _) => None,
        (false, Some(t)) => Some(t),
        (false, None) => prompts::type_filter()?,
    };

    let pb = output::spinner("Fetching questions...");
    let result = client.list(filter).await;
    pb.finish_and_clear();
    Ok(report(result))
}

/// Fetch a question, collect the changes, and send them as a patch.
pub async fn run_update(args: &UpdateArgs, client: &QuestionsClient) -> Result<u8> {
    let id = QuestionId(args.id);

    let pb = output::spinner("Fetching question...");
    let current = client.get(id).await;
    pb.finish_and_clear();
    let current = match current {
        Ok(resp) => resp.body,
        Err(e) => return Ok(report_error(&e)),
    };

    let answers = if args.has_field_flags() {
        args.answers(current.question_type)?
    } else {
        prompts::update_answers(current.question_type)?
    };
    let patch = build_patch(current.question_type, answers)
        .with_context(|| format!("Cannot update Question {id}"))?;

    let pb = output::spinner("Updating question...");
    let result = client.update(id, &patch).await;
    pb.finish_and_clear();
    Ok(report(result))
}

/// Delete a question.
pub async fn run_delete(args: &DeleteArgs, client: &QuestionsClient) -> Result<u8> {
    let pb = output::spinner("Deleting question...");
    let result = client.delete(QuestionId(args.id)).await;
    pb.finish_and_clear();
    Ok(report(result))
}

fn report<T: Serialize>(result: Result<ApiResponse<T>, ClientError>) -> u8 {
    match result {
        Ok(resp) => {
            output::print_success(&resp.description, &resp.body);
            0
        }
        Err(e) => report_error(&e),
    }
}

fn report_error(err: &ClientError) -> u8 {
    tracing::debug!(error = ?err, "request failed");
    output::print_failure(&err.user_message());
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_args() -> UpdateArgs {
        UpdateArgs {
            id: 1,
            description: None,
            question_type: None,
            key_words: None,
            alternatives: None,
        }
    }

    #[test]
    fn update_without_flags_is_interactive() {
        assert!(!update_args().has_field_flags());
    }

    #[test]
    fn same_type_flag_is_not_a_switch() {
        let args = UpdateArgs {
            question_type: Some(QuestionType::Objective),
            description: Some("d".into()),
            ..update_args()
        };
        let answers = args.answers(QuestionType::Objective).unwrap();
        assert!(!answers.switch_type);
        assert_eq!(answers.description.as_deref(), Some("d"));
    }

    #[test]
    fn other_type_flag_is_a_switch() {
        let args = UpdateArgs {
            question_type: Some(QuestionType::Dissertative),
            key_words: Some("Key Word: a; Value: 1".into()),
            ..update_args()
        };
        let answers = args.answers(QuestionType::Objective).unwrap();
        assert!(answers.switch_type);
        let patch = build_patch(QuestionType::Objective, answers).unwrap();
        assert_eq!(patch.question_type, Some(QuestionType::Dissertative));
        assert_eq!(patch.alternatives, Some(None));
    }

    #[test]
    fn invalid_key_words_flag_is_rejected() {
        let args = UpdateArgs {
            key_words: Some("Key Word: a; Value: lots".into()),
            ..update_args()
        };
        assert!(args.answers(QuestionType::Dissertative).is_err());
    }
}
