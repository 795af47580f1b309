//! # questions-cli: Command-line client for the Questions API
//!
//! Provides the `questions` binary:
//!
//! - `questions create` (`c`): create a dissertative or objective question.
//! - `questions get <id>` (`g`): fetch one question.
//! - `questions get-all` (`ga`, `getAll`): fetch all questions, optionally by type.
//! - `questions update <id>` (`u`): change description, type or sub-document.
//! - `questions delete <id>` (`d`): delete a question.
//!
//! Values not passed as flags are prompted for interactively.
//!
//! ```bash
//! questions create --type dissertative --description "Explain SWEBOK" \
//!     --key-words "Key Word: SWEBOK; Value: 0.5 .. Key Word: Areas; Value: 0.5"
//! questions get-all --type objective
//! ```

pub mod commands;
pub mod input;
pub mod output;
pub mod prompts;

use anyhow::Result;
use questions_client::{ClientConfig, QuestionsClient};

/// Build the API client from the environment, with `api_url` taking precedence.
pub fn build_client(api_url: Option<&str>) -> Result<QuestionsClient> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.api_url(url)?;
    }
    tracing::debug!(?config, "client configuration");
    Ok(QuestionsClient::new(config)?)
}
