//! The `drill classes` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use drill_core::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["Class", "Prompt", "Asked", "Dataset", "Mode"]);

    for schema in config.schemas() {
        let asked: Vec<&str> = schema
            .answers
            .iter()
            .map(|a| schema.label(a.column))
            .collect();
        table.add_row(vec![
            Cell::new(&schema.name),
            Cell::new(format!("{} ({})", schema.title, schema.label(schema.prompt))),
            Cell::new(asked.join(", ")),
            Cell::new(config.default_dataset(&schema).display()),
            Cell::new(schema.mode),
        ]);
    }

    println!("{table}");
    Ok(())
}
