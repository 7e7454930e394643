//! Answer grading.
//!
//! Each typed answer is compared against its expected form after trimming
//! surrounding whitespace from the answer only. Comparison is exact: case,
//! diacritics and Unicode composition all matter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::WordRecord;
use crate::error::DrillError;
use crate::schema::WordSchema;

/// Whether a round was answered entirely correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Successful,
    Misspelled,
}

impl Outcome {
    /// Suffix inserted before the extension of the outcome log file.
    pub fn suffix(&self) -> &'static str {
        match self {
            Outcome::Successful => "_successful",
            Outcome::Misspelled => "_misspelled",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Successful => write!(f, "successful"),
            Outcome::Misspelled => write!(f, "misspelled"),
        }
    }
}

/// Grade of a single answered field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGrade {
    /// Record column the answer was checked against.
    pub column: usize,
    /// Column label from the schema.
    pub label: String,
    /// What the learner typed, trimmed.
    pub given: String,
    /// The stored form, untouched.
    pub expected: String,
    pub correct: bool,
}

/// Result of grading one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// One entry per answer field, in asking order.
    pub fields: Vec<FieldGrade>,
    /// True only if every field is correct.
    pub passed: bool,
}

impl Grade {
    /// Per-field correctness, in asking order.
    pub fn per_field(&self) -> Vec<bool> {
        self.fields.iter().map(|f| f.correct).collect()
    }

    pub fn outcome(&self) -> Outcome {
        if self.passed {
            Outcome::Successful
        } else {
            Outcome::Misspelled
        }
    }

    pub fn correct_count(&self) -> usize {
        self.fields.iter().filter(|f| f.correct).count()
    }
}

/// Grade `answers` against the schema's answer fields of `record`.
///
/// `answers` must hold exactly one entry per answer field.
pub fn grade<S: AsRef<str>>(
    schema: &WordSchema,
    record: &WordRecord,
    answers: &[S],
) -> Result<Grade, DrillError> {
    if answers.len() != schema.answers.len() {
        return Err(DrillError::AnswerCount {
            expected: schema.answers.len(),
            found: answers.len(),
        });
    }
    if record.len() != schema.arity() {
        return Err(DrillError::Arity {
            class: schema.name.clone(),
            expected: schema.arity(),
            found: record.len(),
        });
    }

    let fields: Vec<FieldGrade> = schema
        .answers
        .iter()
        .zip(answers)
        .map(|(field, answer)| {
            let given = answer.as_ref().trim();
            let expected = record.field(field.column);
            FieldGrade {
                column: field.column,
                label: schema.label(field.column).to_string(),
                given: given.to_string(),
                expected: expected.to_string(),
                correct: given == expected,
            }
        })
        .collect();

    let passed = fields.iter().all(|f| f.correct);
    Ok(Grade { fields, passed })
}
