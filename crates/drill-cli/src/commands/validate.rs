//! The `drill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use drill_core::config::load_config_from;
use drill_core::dataset::Dataset;

pub fn execute(
    class: String,
    dataset_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let schema = config.schema(&class)?;
    let path = dataset_path.unwrap_or_else(|| config.default_dataset(&schema));

    let dataset = Dataset::load(&path)?;
    dataset.check_arity(&schema)?;

    println!(
        "Dataset: {} ({} words, {} distinct, {} columns, class {})",
        path.display(),
        dataset.len(),
        dataset.distinct_len(),
        schema.arity(),
        schema.name
    );

    let mut warnings = Vec::new();
    if dataset.is_empty() {
        warnings.push("  WARNING: dataset contains no words".to_string());
    }
    for (index, record) in dataset.duplicates() {
        // +2: 1-based, after the header row.
        warnings.push(format!(
            "  [row {}] WARNING: duplicate of an earlier row: {}",
            index + 2,
            record.fields().join(", ")
        ));
    }
    for record in dataset.iter() {
        let blank: Vec<&str> = schema
            .answers
            .iter()
            .filter(|a| record.field(a.column).trim().is_empty())
            .map(|a| schema.label(a.column))
            .collect();
        if !blank.is_empty() {
            warnings.push(format!(
                "  [{}] WARNING: empty expected form(s): {}",
                record.field(schema.prompt),
                blank.join(", ")
            ));
        }
    }

    for w in &warnings {
        println!("{w}");
    }

    if warnings.is_empty() {
        println!("Dataset valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
