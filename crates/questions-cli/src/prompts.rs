//! Interactive prompts for values not given as flags.

use anyhow::Result;
use dialoguer::{Input, MultiSelect, Select};
use questions_core::{Alternatives, KeyWords, QuestionType};

use crate::input::{
    parse_alternatives, parse_key_words, UpdateAnswers, ALTERNATIVES_EXAMPLE, KEY_WORDS_EXAMPLE,
};

pub fn description() -> Result<String> {
    let description = Input::<String>::new()
        .with_prompt("Insert a description")
        .validate_with(|answer: &String| -> Result<(), &str> {
            if answer.trim().is_empty() {
                Err("Insert a valid description")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(description)
}

pub fn question_type() -> Result<QuestionType> {
    let selection = Select::new()
        .with_prompt("Choose a Question type")
        .items(&["Dissertative", "Objective"])
        .default(0)
        .interact()?;
    Ok(QuestionType::ALL[selection])
}

/// `None` means all types.
pub fn type_filter() -> Result<Option<QuestionType>> {
    let selection = Select::new()
        .with_prompt("Which questions do you want to fetch?")
        .items(&["All", "Dissertative", "Objective"])
        .default(0)
        .interact()?;
    Ok(match selection {
        0 => None,
        n => Some(QuestionType::ALL[n - 1]),
    })
}

pub fn key_words() -> Result<KeyWords> {
    let raw = Input::<String>::new()
        .with_prompt(format!("Insert Key Words (e.g. \"{KEY_WORDS_EXAMPLE}\")"))
        .validate_with(|answer: &String| -> Result<(), String> {
            parse_key_words(answer).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    parse_key_words(&raw)
}

pub fn alternatives() -> Result<Alternatives> {
    let raw = Input::<String>::new()
        .with_prompt(format!("Insert Alternatives (e.g. \"{ALTERNATIVES_EXAMPLE}\")"))
        .validate_with(|answer: &String| -> Result<(), String> {
            parse_alternatives(answer).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    parse_alternatives(&raw)
}

/// Ask which fields of a `current`-typed question to change, then for
/// their new values. Switching type always asks for the new sub-document.
pub fn update_answers(current: QuestionType) -> Result<UpdateAnswers> {
    let switch_label = match current.other() {
        QuestionType::Objective => "Type, change to Objective ?",
        QuestionType::Dissertative => "Type, change to Dissertative ?",
    };
    let sub_document_label = match current {
        QuestionType::Dissertative => "Key Words",
        QuestionType::Objective => "Alternatives",
    };
    let fields = ["Description", switch_label, sub_document_label];

    let selected = loop {
        let selected = MultiSelect::new()
            .with_prompt("Which field do you want to update ?")
            .items(&fields)
            .interact()?;
        if selected.is_empty() {
            crate::output::print_hint("Select one field");
            continue;
        }
        if selected.contains(&1) && selected.contains(&2) {
            crate::output::print_hint(&format!(
                "Cannot change Type and {sub_document_label} at the same time"
            ));
            continue;
        }
        break selected;
    };

    let mut answers = UpdateAnswers::default();
    if selected.contains(&0) {
        answers.description = Some(description()?);
    }
    answers.switch_type = selected.contains(&1);

    let wants_key_words = (current == QuestionType::Dissertative && selected.contains(&2))
        || (current == QuestionType::Objective && answers.switch_type);
    let wants_alternatives = (current == QuestionType::Objective && selected.contains(&2))
        || (current == QuestionType::Dissertative && answers.switch_type);

    if wants_key_words {
        answers.key_words = Some(key_words()?);
    }
    if wants_alternatives {
        answers.alternatives = Some(alternatives()?);
    }
    Ok(answers)
}
