use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use saathi_core::language::Language;
use saathi_core::storage::{keys, SliceStorage};
use saathi_core::NgoStore;
use saathi_infrastructure::{AppConfig, JsonFileStore};

mod commands;

#[derive(Parser)]
#[command(name = "saathi")]
#[command(about = "Saathi - local-first activity management for small NGOs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the NGO profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Record, list, and look up activities
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Inspect or prune the downloaded-files log
    Downloads {
        #[command(subcommand)]
        action: commands::downloads::DownloadsAction,
    },
    /// Show or change the interface language
    Language {
        #[command(subcommand)]
        action: commands::language::LanguageAction,
    },
    /// Generate a text report for an activity and record the download
    Report(commands::report::ReportArgs),
}

/// Applies the config's `default_language` only when no language slice has
/// ever been persisted. Once `language set` has written a choice, config
/// stays out of the way even when the choice equals the built-in default.
fn seed_default_language(
    store: &mut NgoStore,
    storage: &dyn SliceStorage,
    default_language: Option<Language>,
) {
    let Some(language) = default_language else {
        return;
    };
    if matches!(storage.load_value(keys::LANGUAGE), Ok(None)) {
        store.set_language(language);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let storage = Arc::new(JsonFileStore::new(config.storage_dir()?));
    let mut store = NgoStore::new(storage.clone());
    seed_default_language(&mut store, storage.as_ref(), config.default_language);

    match cli.command {
        Commands::Profile { action } => commands::profile::run(&mut store, action)?,
        Commands::Activity { action } => commands::activity::run(&mut store, action)?,
        Commands::Downloads { action } => commands::downloads::run(&mut store, action)?,
        Commands::Language { action } => commands::language::run(&mut store, action)?,
        Commands::Report(args) => commands::report::run(&mut store, args)?,
    }

    Ok(())
}
