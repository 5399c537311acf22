use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use league_suggest::config::Config;
use league_suggest::dataset::load_rows;
use league_suggest::display::output::{
    display_error, display_info, display_pass_report, display_success, display_suggestions,
    display_warning,
};
use league_suggest::{
    run_pass, JsonSnapshotStore, PassOptions, PrecomputedClassifier, SqliteSuggestionStore,
    SuggestionEmitter, SuggestionStore,
};

#[derive(Parser, Debug)]
#[command(name = "League Suggest")]
#[command(about = "Rank team composition suggestions from classifier-scored matches", long_about = None)]
struct Args {
    /// Log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an aggregation pass and replace the stored suggestions
    Generate {
        /// JSON dataset of composition samples
        #[arg(long)]
        dataset: PathBuf,

        /// JSON predictions exported by the classifier (classes + probabilities)
        #[arg(long)]
        predictions: PathBuf,

        /// Number of suggestions to keep (default: 100)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Game mode tag stored on every suggestion
        #[arg(long)]
        game_mode: Option<String>,

        /// SQLite database path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Also write a JSON snapshot of the suggestions
        #[arg(long, conflicts_with = "dry_run")]
        snapshot: Option<PathBuf>,

        /// Compute and display without persisting anything
        #[arg(long)]
        dry_run: bool,

        /// Number of suggestions to display (default: 10)
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// List the stored suggestions
    Show {
        /// Number of suggestions to display (default: 20)
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// SQLite database path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Read from a JSON snapshot instead of the database
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;

    match args.command {
        Command::Generate {
            dataset,
            predictions,
            limit,
            game_mode,
            db,
            snapshot,
            dry_run,
            top,
        } => {
            if let Some(limit) = limit {
                ensure!(limit > 0, "--limit must be a positive integer");
                config.limit = limit;
            }
            if let Some(game_mode) = game_mode {
                config.game_mode = game_mode;
            }
            if let Some(db) = db {
                config.db_path = db;
            }
            generate(&config, &dataset, &predictions, snapshot, dry_run, top)
        }
        Command::Show { limit, db, snapshot } => {
            if let Some(db) = db {
                config.db_path = db;
            }
            show(&config, limit, snapshot)
        }
    }
}

fn generate(
    config: &Config,
    dataset: &Path,
    predictions: &Path,
    snapshot: Option<PathBuf>,
    dry_run: bool,
    top: usize,
) -> Result<()> {
    // Step 1: Load validated rows and the classifier output
    display_info(&format!("Loading dataset {}", dataset.display()));
    let rows = load_rows(dataset).context("loading composition samples")?;
    display_success(&format!("Loaded {} rows", rows.len()));

    let classifier = PrecomputedClassifier::load(predictions).context("loading predictions")?;
    match classifier.generated_at() {
        Some(at) => display_info(&format!("Predictions generated at {}", at.to_rfc3339())),
        None => display_warning("Predictions file carries no generatedAt timestamp"),
    }

    // Step 2: Aggregate and rank
    let outcome = run_pass(rows, &classifier, &PassOptions::from(config))?;
    display_pass_report(&outcome.report);

    let emitter = SuggestionEmitter::from_config(config);
    let generated_at = Utc::now();

    // Step 3: Persist (or not)
    let records = if dry_run {
        display_warning("Dry run: stored suggestions left unchanged");
        emitter.to_records(&outcome.suggestions, generated_at)
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_message(format!("Writing suggestions to {}", config.db_path.display()));
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut store = SqliteSuggestionStore::open(&config.db_path)?;
        let result = emitter.emit(&mut store, &outcome.suggestions, generated_at);
        pb.finish_and_clear();
        let records = result
            .with_context(|| format!("replacing suggestions in {}", config.db_path.display()))?;
        display_success(&format!(
            "Stored {} suggestions in {}",
            records.len(),
            config.db_path.display()
        ));

        if let Some(path) = snapshot {
            let mut snapshot_store = JsonSnapshotStore::new(path);
            snapshot_store
                .replace_unscoped_suggestions(&records)
                .with_context(|| format!("writing snapshot {}", snapshot_store.path().display()))?;
            display_success(&format!("Snapshot written to {}", snapshot_store.path().display()));
        }

        records
    };

    let shown = top.min(records.len());
    display_suggestions(&records[..shown], "Top Composition Suggestions");
    Ok(())
}

fn show(config: &Config, limit: usize, snapshot: Option<PathBuf>) -> Result<()> {
    let records = match snapshot {
        Some(path) => {
            let store = JsonSnapshotStore::new(path);
            store.load_unscoped_suggestions(limit)?
        }
        None => {
            let store = SqliteSuggestionStore::open(&config.db_path)?;
            store.load_unscoped_suggestions(limit)?
        }
    };

    display_suggestions(&records, "Stored Composition Suggestions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn snapshot_cannot_be_combined_with_dry_run() {
        let err = Args::try_parse_from([
            "league-suggest",
            "generate",
            "--dataset",
            "rows.json",
            "--predictions",
            "preds.json",
            "--dry-run",
            "--snapshot",
            "out.json",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn snapshot_is_accepted_without_dry_run() {
        let args = Args::try_parse_from([
            "league-suggest",
            "generate",
            "--dataset",
            "rows.json",
            "--predictions",
            "preds.json",
            "--snapshot",
            "out.json",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::Generate { snapshot: Some(_), dry_run: false, .. }
        ));
    }
}
