//! The `drill run` command.

use std::path::PathBuf;

use anyhow::Result;

use drill_core::config::load_config_from;
use drill_core::dataset::Dataset;
use drill_core::schema::SelectionMode;
use drill_core::session::{Session, SessionEnd};

use crate::console::{render_summary, Console, StdinAnswers};

pub fn execute(
    class: String,
    dataset_path: Option<PathBuf>,
    mode: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let schema = config.schema(&class)?;

    let mode: SelectionMode = match mode {
        Some(m) => m.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?,
        None => schema.mode,
    };

    let path = dataset_path.unwrap_or_else(|| config.default_dataset(&schema));
    let dataset = Dataset::load(&path)?;
    let words = dataset.len();

    let mut session = Session::new(schema, dataset, mode, config.layout(), rand::rng())?;
    let console = Console::new(config.color);
    let mut answers = StdinAnswers::stdin();

    match session.run(&mut answers, &console)? {
        SessionEnd::Completed(stats) => {
            println!("{}", render_summary(&stats, words, &path));
        }
        SessionEnd::Interrupted(_) => {
            // No summary: the session never reached its end.
            println!();
        }
    }

    Ok(())
}
