//! CSV dataset loader.
//!
//! Reads a word list into an ordered, immutable sequence of records. The
//! first row is always treated as a header and discarded.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::schema::WordSchema;

/// One row of a dataset: the English gloss followed by the word forms.
///
/// Equality and hashing are by value over every field, so two rows with
/// identical text are the same record wherever sets are involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordRecord(Vec<String>);

impl WordRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Field at `index`, or an empty string if the record is shorter.
    pub fn field(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for WordRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An ordered word list loaded from one file.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    records: Vec<WordRecord>,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DrillError::DatasetNotFound(path.to_path_buf()).into());
        }
        let file = File::open(path)
            .with_context(|| format!("failed to open dataset: {}", path.display()))?;
        Self::from_reader(file, path)
    }

    /// Parse a dataset from any reader (useful for testing).
    ///
    /// The first row is skipped whatever it contains. Every data row must
    /// have as many fields as the first data row.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records: Vec<WordRecord> = Vec::new();
        for (index, row) in rdr.records().enumerate().skip(1) {
            // Row numbers are 1-based and the header is row 1.
            let context = || {
                format!("failed to parse row {} of {}", index + 1, source.display())
            };
            let row = row.with_context(context)?;
            if let Some(first) = records.first() {
                if row.len() != first.len() {
                    return Err(anyhow::anyhow!(
                        "found {} fields, but the first data row has {}",
                        row.len(),
                        first.len()
                    ))
                    .with_context(context);
                }
            }
            records.push(row.iter().collect());
        }

        tracing::debug!(path = %source.display(), words = records.len(), "loaded dataset");

        Ok(Self {
            path: source.to_path_buf(),
            records,
        })
    }

    /// Build a dataset from records already in memory.
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<WordRecord>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct records (duplicates counted once).
    pub fn distinct_len(&self) -> usize {
        self.records.iter().collect::<HashSet<_>>().len()
    }

    /// Fail unless every record has exactly as many fields as the schema
    /// declares columns.
    pub fn check_arity(&self, schema: &WordSchema) -> Result<(), DrillError> {
        match self.records.iter().find(|r| r.len() != schema.arity()) {
            Some(record) => Err(DrillError::Arity {
                class: schema.name.clone(),
                expected: schema.arity(),
                found: record.len(),
            }),
            None => Ok(()),
        }
    }

    /// Rows that repeat an earlier row, with their 0-based data row index.
    pub fn duplicates(&self) -> Vec<(usize, &WordRecord)> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| !seen.insert(*record))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a WordRecord;
    type IntoIter = std::slice::Iter<'a, WordRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
