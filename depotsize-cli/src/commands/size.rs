//! Size command - report a game's install size.

use std::fmt::Write;
use std::path::PathBuf;

use depotsize::config::format_size;
use depotsize::depot::{AggregateReport, AppId};
use depotsize::game::Game;
use depotsize::orchestrator::{AttemptState, SizeReport};

use super::common::{merge_settings, CliRunner};
use crate::error::CliError;

/// Arguments for the size command.
pub struct SizeArgs {
    pub name: String,
    pub source: Option<String>,
    pub store_id: Option<String>,
    pub dlc: bool,
    pub optional: bool,
    pub image: Option<PathBuf>,
    pub not_installed: bool,
    pub platform: String,
    pub breakdown: bool,
}

/// Run the size command.
pub fn run(args: SizeArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let settings = merge_settings(runner.config(), args.dlc, args.optional);
    let engine = runner.engine_with(settings)?;
    let game = build_game(&args);

    let report = runner.runtime().block_on(engine.run(&game));
    print!("{}", format_report(&game.name, &report));

    for note in engine.notifications().drain() {
        eprintln!("warning: {} failed: {}", note.key.strategy, note.message);
    }

    if args.breakdown {
        match runner.runtime().block_on(engine.breakdown(&game)) {
            Some((app_id, breakdown)) => print!("{}", format_breakdown(app_id, &breakdown)),
            None => println!("\nNo catalog breakdown available."),
        }
    }

    Ok(())
}

/// Build the game record described by the arguments.
pub fn build_game(args: &SizeArgs) -> Game {
    let mut game = Game::new("cli", args.name.trim())
        .with_platform(args.platform.as_str())
        .with_installed(!args.not_installed);

    if let Some(source) = &args.source {
        game = game.with_source(source.as_str());
    }
    if let Some(store_id) = &args.store_id {
        game = game.with_store_id(store_id.as_str());
    }
    if let Some(image) = &args.image {
        game = game.with_image_path(image.clone());
    }
    game
}

/// Render the size line and each strategy's outcome.
pub fn format_report(name: &str, report: &SizeReport) -> String {
    let mut out = String::new();

    if let Some(reason) = report.skipped {
        let _ = writeln!(out, "{}: unknown install size ({})", name, reason);
        return out;
    }

    match (report.size(), report.answered_by()) {
        (Some(size), Some(strategy)) => {
            let _ = writeln!(out, "{}: {} ({})", name, format_size(size), strategy);
        }
        _ => {
            let _ = writeln!(out, "{}: unknown install size", name);
        }
    }

    for attempt in &report.attempts {
        let state = match &attempt.state {
            AttemptState::Found(size) => format_size(*size),
            other => other.to_string(),
        };
        let marker = if attempt.preferred { "*" } else { " " };
        let _ = writeln!(out, "  {} {:<12} {}", marker, attempt.strategy, state);
    }
    out
}

/// Render the per-app breakdown.
pub fn format_breakdown(app_id: AppId, report: &AggregateReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Catalog breakdown for app {}", app_id);

    for app in &report.apps {
        let _ = writeln!(
            out,
            "  app {}: {} ({} units)",
            app.app_id,
            format_size(app.subtotal()),
            app.units.len()
        );
        for unit in &app.units {
            let _ = writeln!(
                out,
                "    [{}] {}  {}",
                unit.id,
                unit.name,
                format_size(unit.size)
            );
        }
    }

    for failed in &report.failed_extra_apps {
        let _ = writeln!(out, "  app {}: unavailable, counted as zero", failed);
    }

    match report.total() {
        Some(total) => {
            let _ = writeln!(out, "  total: {}", format_size(total));
        }
        None => {
            let _ = writeln!(out, "  total: unknown");
        }
    }
    out
}
