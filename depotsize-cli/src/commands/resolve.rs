//! Resolve command - look up a title's catalog app id.

use super::common::CliRunner;
use crate::error::CliError;

/// Resolve a title by exact normalized match.
pub fn run(name: &str) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let engine = runner.engine()?;

    match runner.runtime().block_on(engine.resolver().resolve_name(name)) {
        Some(app_id) => {
            println!("{} => app {}", name.trim(), app_id);
            Ok(())
        }
        None => Err(CliError::NotFound(format!(
            "No catalog app matches '{}'. Titles must match exactly (case and spacing aside).",
            name.trim()
        ))),
    }
}
