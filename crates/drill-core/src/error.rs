//! Drill error types.
//!
//! These errors represent the failures a caller may want to tell apart:
//! a missing dataset is reported differently from a malformed one, and an
//! unknown word class lists the classes that do exist.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the drill engine.
#[derive(Debug, Error)]
pub enum DrillError {
    /// The dataset path does not resolve to a regular file.
    #[error("dataset file '{}' not found", .0.display())]
    DatasetNotFound(PathBuf),

    /// The dataset has no data rows.
    #[error("dataset '{}' contains no words", .0.display())]
    EmptyDataset(PathBuf),

    /// The dataset's records do not have the arity the schema expects.
    #[error("word class '{class}' expects {expected} columns, dataset rows have {found}")]
    Arity {
        class: String,
        expected: usize,
        found: usize,
    },

    /// Grading was given the wrong number of answers.
    #[error("expected {expected} answers, got {found}")]
    AnswerCount { expected: usize, found: usize },

    /// No schema is registered under this name.
    #[error("unknown word class '{name}' (known: {})", .known.join(", "))]
    UnknownClass { name: String, known: Vec<String> },

    /// A schema failed validation.
    #[error("invalid schema '{class}': {reason}")]
    InvalidSchema { class: String, reason: String },
}

impl DrillError {
    /// Returns `true` if the error stems from the dataset rather than the
    /// configuration or the caller.
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            DrillError::DatasetNotFound(_) | DrillError::EmptyDataset(_) | DrillError::Arity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_path() {
        let err = DrillError::DatasetNotFound(PathBuf::from("db/nouns.csv"));
        assert_eq!(err.to_string(), "dataset file 'db/nouns.csv' not found");
        assert!(err.is_dataset_error());
    }

    #[test]
    fn unknown_class_lists_known() {
        let err = DrillError::UnknownClass {
            name: "adverbs".into(),
            known: vec!["adjectives".into(), "nouns".into()],
        };
        assert_eq!(
            err.to_string(),
            "unknown word class 'adverbs' (known: adjectives, nouns)"
        );
        assert!(!err.is_dataset_error());
    }
}
