//! # questions CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use questions_cli::commands::{
    run_create, run_delete, run_get, run_get_all, run_update, CreateArgs, DeleteArgs, GetAllArgs,
    GetArgs, UpdateArgs,
};
use questions_cli::output;

/// A CLI to communicate with the Questions API.
#[derive(Parser, Debug)]
#[command(name = "questions", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the Questions API.
    #[arg(long, env = "QUESTIONS_CLI_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Creates a question.
    #[command(alias = "c")]
    Create(CreateArgs),

    /// Fetches a question by its ID.
    #[command(alias = "g")]
    Get(GetArgs),

    /// Fetches all questions.
    #[command(name = "get-all", aliases = ["ga", "getAll"])]
    GetAll(GetAllArgs),

    /// Updates a question by its ID.
    #[command(alias = "u")]
    Update(UpdateArgs),

    /// Deletes a question by its ID.
    #[command(alias = "d")]
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = match questions_cli::build_client(cli.api_url.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            output::print_failure(&format!("{e:#}"));
            return ExitCode::from(1);
        }
    };
    tracing::debug!(api_url = %client.base_url(), "questions CLI starting");

    let result = match &cli.command {
        Commands::Create(args) => run_create(args, &client).await,
        Commands::Get(args) => run_get(args, &client).await,
        Commands::GetAll(args) => run_get_all(args, &client).await,
        Commands::Update(args) => run_update(args, &client).await,
        Commands::Delete(args) => run_delete(args, &client).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            output::print_failure(&format!("{e:#}"));
            ExitCode::from(1)
        }
    }
}
