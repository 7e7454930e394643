//! Drill configuration.
//!
//! Holds the input/output directories, color preference and any word
//! classes declared on top of the built-in schemas.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::outcome_log::LogLayout;
use crate::schema::{builtin_schemas, WordSchema};

/// Top-level drill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Directory default datasets are read from.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Directory outcome logs are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Colorize terminal output.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Extra word classes keyed by name; these override built-ins.
    #[serde(default)]
    pub classes: BTreeMap<String, WordSchema>,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("db")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("tmp")
}
fn default_true() -> bool {
    true
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            color: true,
            classes: BTreeMap::new(),
        }
    }
}

impl DrillConfig {
    /// Parse a TOML configuration string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: DrillConfig = toml::from_str(content)?;
        for (name, schema) in config.classes.iter_mut() {
            if schema.name.is_empty() {
                schema.name = name.clone();
            }
        }
        Ok(config)
    }

    /// Input/output directories as a log layout.
    pub fn layout(&self) -> LogLayout {
        LogLayout::new(&self.input_dir, &self.output_dir)
    }

    /// Every known word class: built-ins, overridden or extended by the
    /// configured classes, sorted by name.
    pub fn schemas(&self) -> Vec<WordSchema> {
        let mut all: BTreeMap<String, WordSchema> = builtin_schemas()
            .into_iter()
            .map(|s| (s.name.to_lowercase(), s))
            .collect();
        for schema in self.classes.values() {
            all.insert(schema.name.to_lowercase(), schema.clone());
        }
        all.into_values().collect()
    }

    /// Look up a word class by name, case-insensitively.
    pub fn schema(&self, name: &str) -> Result<WordSchema, DrillError> {
        let schemas = self.schemas();
        let wanted = name.to_lowercase();
        if let Some(schema) = schemas.iter().find(|s| s.name.to_lowercase() == wanted) {
            schema.validate()?;
            return Ok(schema.clone());
        }
        Err(DrillError::UnknownClass {
            name: name.to_string(),
            known: schemas.into_iter().map(|s| s.name).collect(),
        })
    }

    /// Default dataset path for a class: `<input_dir>/<schema.dataset>`.
    pub fn default_dataset(&self, schema: &WordSchema) -> PathBuf {
        self.input_dir.join(&schema.dataset)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `drill.toml` in the current directory
/// 2. `~/.config/drill/config.toml`
///
/// Environment variable overrides: `DRILL_INPUT_DIR`, `DRILL_OUTPUT_DIR`,
/// `NO_COLOR`.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("drill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loading config");
            DrillConfig::from_toml(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn apply_env_overrides(config: &mut DrillConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = var("DRILL_INPUT_DIR").filter(|d| !d.is_empty()) {
        config.input_dir = PathBuf::from(dir);
    }
    if let Some(dir) = var("DRILL_OUTPUT_DIR").filter(|d| !d.is_empty()) {
        config.output_dir = PathBuf::from(dir);
    }
    // https://no-color.org: any non-empty value disables color.
    if var("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        config.color = false;
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("drill"))
}
