//! drill CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use drill_core::DrillError;
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "drill", version, about = "Interactive vocabulary drills")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drill a word class
    Run {
        /// Word class (e.g. adjectives, nouns, verbs)
        class: String,

        /// CSV dataset (default: the class's file in the input directory)
        dataset: Option<PathBuf>,

        /// Selection mode: unique or repeat (default: per word class)
        #[arg(long)]
        mode: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a dataset against its word class
    Validate {
        /// Word class (e.g. adjectives, nouns, verbs)
        class: String,

        /// CSV dataset (default: the class's file in the input directory)
        dataset: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List known word classes
    Classes {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example dataset
    Init,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("drill=warn,drill_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            class,
            dataset,
            mode,
            config,
        } => commands::run::execute(class, dataset, mode, config),
        Commands::Validate {
            class,
            dataset,
            config,
        } => commands::validate::execute(class, dataset, config),
        Commands::Classes { config } => commands::classes::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        if e
            .downcast_ref::<DrillError>()
            .is_some_and(DrillError::is_dataset_error)
        {
            eprintln!("Hint: run `drill validate <class> [dataset]` to check the word list.");
        }
        process::exit(1);
    }
}
