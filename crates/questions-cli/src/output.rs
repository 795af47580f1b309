//! Terminal output: request spinner and coloured result lines.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Start a spinner shown while a request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print the envelope description in green followed by the pretty-printed body.
pub fn print_success<T: Serialize>(description: &str, body: &T) {
    println!("{}", description.green());
    match serde_json::to_string_pretty(body) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!("could not render response body: {e}"),
    }
}

/// Print a failure message in red.
pub fn print_failure(message: &str) {
    eprintln!("{}", message.red());
}

/// Print a hint in yellow.
pub fn print_hint(message: &str) {
    println!("{}", message.yellow());
}
