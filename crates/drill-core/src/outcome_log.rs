//! Append-only outcome logs.
//!
//! Every graded round is appended to one of two CSV files next to each
//! other in the output directory: `<stem>_successful.csv` or
//! `<stem>_misspelled.csv`. A log never holds the same row twice and its
//! header is written exactly once, when the file is created or empty.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dataset::WordRecord;
use crate::grading::Outcome;

/// What [`append`] did with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogWrite {
    /// The row was written (with a header first if the log was new).
    Appended,
    /// An identical row was already logged; nothing was written.
    Duplicate,
}

/// Where datasets are read from and where outcome logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLayout {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl LogLayout {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Outcome log path for a dataset. See [`outcome_path`].
    pub fn outcome_path(&self, dataset: &Path, outcome: Outcome) -> PathBuf {
        outcome_path(dataset, &self.input_dir, &self.output_dir, outcome)
    }
}

impl Default for LogLayout {
    fn default() -> Self {
        Self::new("db", "tmp")
    }
}

/// Derive the log path for `dataset` and `outcome`.
///
/// The input directory is swapped for the output directory so the output
/// tree mirrors the input tree (`db/nouns.csv` becomes
/// `tmp/nouns_successful.csv`). If the input directory is not part of the
/// dataset path, the log goes straight into the output directory.
pub fn outcome_path(
    dataset: &Path,
    input_dir: &Path,
    output_dir: &Path,
    outcome: Outcome,
) -> PathBuf {
    let relocated = relocate(dataset, input_dir, output_dir);

    let stem = relocated
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match relocated.extension() {
        Some(ext) => format!("{stem}{}.{}", outcome.suffix(), ext.to_string_lossy()),
        None => format!("{stem}{}", outcome.suffix()),
    };

    relocated.with_file_name(file_name)
}

fn relocate(dataset: &Path, input_dir: &Path, output_dir: &Path) -> PathBuf {
    if let Ok(rest) = dataset.strip_prefix(input_dir) {
        if !rest.as_os_str().is_empty() {
            return output_dir.join(rest);
        }
    }

    // A single-segment input dir may sit anywhere in the path: `/home/me/db/x.csv`.
    let mut segments = input_dir.components();
    if let (Some(Component::Normal(segment)), None) = (segments.next(), segments.next()) {
        let mut replaced = false;
        let mut out = PathBuf::new();
        let parent_count = dataset.components().count().saturating_sub(1);
        for (index, component) in dataset.components().enumerate() {
            match component {
                Component::Normal(name) if !replaced && index < parent_count && name == segment => {
                    out.push(output_dir);
                    replaced = true;
                }
                other => out.push(other),
            }
        }
        if replaced {
            return out;
        }
    }

    match dataset.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.to_path_buf(),
    }
}

/// Append `row` to the log at `path` unless an identical row is already there.
///
/// Creates missing parent directories. A missing or zero-length log gets
/// `header` as its first line.
pub fn append(path: &Path, header: &[String], row: &WordRecord) -> Result<LogWrite> {
    let existing = match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Some(
            fs::read(path)
                .with_context(|| format!("failed to read outcome log: {}", path.display()))?,
        ),
        _ => None,
    };

    if let Some(content) = &existing {
        let rows = parse_rows(content, path)?;
        if rows.contains(row) {
            tracing::debug!(path = %path.display(), "row already logged, skipping");
            return Ok(LogWrite::Duplicate);
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open outcome log: {}", path.display()))?;

    // Hand-edited logs may lack a final newline.
    if existing.as_ref().is_some_and(|c| !c.ends_with(b"\n")) {
        file.write_all(b"\n")?;
    }

    let mut writer = csv::Writer::from_writer(file);
    if existing.is_none() {
        writer.write_record(header)?;
    }
    writer.write_record(row.fields())?;
    writer
        .flush()
        .with_context(|| format!("failed to write outcome log: {}", path.display()))?;

    tracing::debug!(path = %path.display(), new_log = existing.is_none(), "row logged");
    Ok(LogWrite::Appended)
}

/// Every data row of the log at `path` (header skipped). A missing log has
/// no rows.
pub fn read_rows(path: &Path) -> Result<HashSet<WordRecord>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let content =
        fs::read(path).with_context(|| format!("failed to read outcome log: {}", path.display()))?;
    parse_rows(&content, path)
}

fn parse_rows(content: &[u8], path: &Path) -> Result<HashSet<WordRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let mut rows = HashSet::new();
    for row in rdr.records() {
        let row =
            row.with_context(|| format!("failed to parse outcome log: {}", path.display()))?;
        rows.insert(row.iter().collect::<WordRecord>());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["English", "Positiv", "Komparativ", "Superlativ"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn same_row_twice_is_logged_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjectives_misspelled.csv");
        let row = WordRecord::from_iter(["good", "god", "bedre", "bedst"]);

        assert_eq!(append(&path, &header(), &row).unwrap(), LogWrite::Appended);
        assert_eq!(append(&path, &header(), &row).unwrap(), LogWrite::Duplicate);

        assert_eq!(
            lines(&path),
            vec!["English,Positiv,Komparativ,Superlativ", "good,god,bedre,bedst"]
        );
    }

    #[test]
    fn header_written_once_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let first = WordRecord::from_iter(["good", "god", "bedre", "bedst"]);
        let second = WordRecord::from_iter(["big", "stor", "større", "størst"]);

        append(&path, &header(), &first).unwrap();
        append(&path, &header(), &second).unwrap();

        let lines = lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "English,Positiv,Komparativ,Superlativ");
        assert_eq!(lines[1], "good,god,bedre,bedst");
        assert_eq!(lines[2], "big,stor,større,størst");
    }

    #[test]
    fn empty_file_gets_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "").unwrap();

        let row = WordRecord::from_iter(["good", "god", "bedre", "bedst"]);
        append(&path, &header(), &row).unwrap();
        assert_eq!(lines(&path).len(), 2);
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmp").join("nested").join("log.csv");

        let row = WordRecord::from_iter(["good", "god", "bedre", "bedst"]);
        append(&path, &header(), &row).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn header_row_is_not_a_logged_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let first = WordRecord::from_iter(["good", "god", "bedre", "bedst"]);
        append(&path, &header(), &first).unwrap();

        // A data row that happens to equal the header is still new.
        let header_like: WordRecord = header().into_iter().collect();
        assert_eq!(
            append(&path, &header(), &header_like).unwrap(),
            LogWrite::Appended
        );
    }

    #[test]
    fn quoted_fields_dedup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let row = WordRecord::from_iter(["one, two", "a\"b", "c", "d"]);

        append(&path, &header(), &row).unwrap();
        assert_eq!(append(&path, &header(), &row).unwrap(), LogWrite::Duplicate);

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows.contains(&row));
    }

    #[test]
    fn appends_after_missing_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "English,Positiv,Komparativ,Superlativ\ngood,god,bedre,bedst").unwrap();

        let row = WordRecord::from_iter(["big", "stor", "større", "størst"]);
        append(&path, &header(), &row).unwrap();
        assert_eq!(lines(&path).len(), 3);
        assert_eq!(read_rows(&path).unwrap().len(), 2);
    }

    #[test]
    fn read_rows_of_missing_log() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_rows(&dir.path().join("nope.csv")).unwrap().is_empty());
    }

    #[test]
    fn path_swaps_input_dir_for_output_dir() {
        let path = outcome_path(
            Path::new("db/nouns.csv"),
            Path::new("db"),
            Path::new("tmp"),
            Outcome::Successful,
        );
        assert_eq!(path, PathBuf::from("tmp/nouns_successful.csv"));
    }

    #[test]
    fn path_mirrors_subdirectories() {
        let layout = LogLayout::default();
        let path = layout.outcome_path(Path::new("db/level2/verbs.csv"), Outcome::Misspelled);
        assert_eq!(path, PathBuf::from("tmp/level2/verbs_misspelled.csv"));
    }

    #[test]
    fn path_with_input_dir_deeper_in_the_tree() {
        let path = outcome_path(
            Path::new("/home/learner/db/adjectives.csv"),
            Path::new("db"),
            Path::new("tmp"),
            Outcome::Misspelled,
        );
        assert_eq!(
            path,
            PathBuf::from("/home/learner/tmp/adjectives_misspelled.csv")
        );
    }

    #[test]
    fn path_without_input_dir_goes_to_output_dir() {
        let path = outcome_path(
            Path::new("lists/words.csv"),
            Path::new("db"),
            Path::new("tmp"),
            Outcome::Successful,
        );
        assert_eq!(path, PathBuf::from("tmp/words_successful.csv"));
    }

    #[test]
    fn path_file_named_like_input_dir_is_untouched() {
        let path = outcome_path(
            Path::new("lists/db"),
            Path::new("db"),
            Path::new("tmp"),
            Outcome::Successful,
        );
        assert_eq!(path, PathBuf::from("tmp/db_successful"));
    }
}
