//! Word class schemas.
//!
//! A schema declares everything that differs between word classes: the
//! column labels of the dataset, which column is the English gloss, which is
//! shown as the prompt, and which columns the learner has to type.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrillError;

/// How the next word is drawn from the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Without replacement: every word once, then the session ends.
    #[default]
    #[serde(alias = "without-replacement")]
    Unique,
    /// With replacement: words may repeat and the session never ends.
    #[serde(alias = "with-replacement")]
    Repeat,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Unique => write!(f, "unique"),
            SelectionMode::Repeat => write!(f, "repeat"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unique" | "without-replacement" => Ok(SelectionMode::Unique),
            "repeat" | "with-replacement" => Ok(SelectionMode::Repeat),
            other => Err(format!("unknown selection mode: {other}")),
        }
    }
}

/// A column the learner has to type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerField {
    /// Index of the expected value in the record.
    pub column: usize,
    /// Question shown when asking for this field (e.g. "Comparative (more)").
    pub question: String,
}

/// Declarative description of one word class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSchema {
    /// Class name used on the command line (e.g. "nouns").
    #[serde(default)]
    pub name: String,
    /// Label printed in front of the prompt word (e.g. "Bydeform").
    pub title: String,
    /// Default dataset file, relative to the input directory.
    pub dataset: PathBuf,
    /// Column labels; also the header row of the outcome logs.
    pub columns: Vec<String>,
    /// Column holding the English gloss.
    #[serde(default)]
    pub gloss: usize,
    /// Column shown as the question.
    pub prompt: usize,
    /// Columns the learner answers, in asking order.
    pub answers: Vec<AnswerField>,
    /// Default selection mode for this class.
    #[serde(default)]
    pub mode: SelectionMode,
}

impl WordSchema {
    /// Number of fields every record of this class has.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Header row for outcome logs.
    pub fn header(&self) -> &[String] {
        &self.columns
    }

    /// Label of a column, or an empty string if it is out of range.
    pub fn label(&self, column: usize) -> &str {
        self.columns.get(column).map(String::as_str).unwrap_or("")
    }

    /// Check that every index points inside the record and that the
    /// answer columns are distinct from the display columns.
    pub fn validate(&self) -> Result<(), DrillError> {
        let invalid = |reason: String| DrillError::InvalidSchema {
            class: self.name.clone(),
            reason,
        };

        if self.columns.is_empty() {
            return Err(invalid("no columns declared".into()));
        }
        let arity = self.arity();
        if self.gloss >= arity {
            return Err(invalid(format!("gloss column {} out of range", self.gloss)));
        }
        if self.prompt >= arity {
            return Err(invalid(format!(
                "prompt column {} out of range",
                self.prompt
            )));
        }
        if self.answers.is_empty() {
            return Err(invalid("no answer fields declared".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.answers {
            if field.column >= arity {
                return Err(invalid(format!(
                    "answer column {} out of range",
                    field.column
                )));
            }
            if field.column == self.gloss || field.column == self.prompt {
                return Err(invalid(format!(
                    "answer column {} is also displayed to the learner",
                    field.column
                )));
            }
            if !seen.insert(field.column) {
                return Err(invalid(format!(
                    "answer column {} declared twice",
                    field.column
                )));
            }
        }

        Ok(())
    }
}

fn answer(column: usize, question: &str) -> AnswerField {
    AnswerField {
        column,
        question: question.to_string(),
    }
}

fn labels(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

/// The adjective, noun and verb schemas that ship with drill.
pub fn builtin_schemas() -> Vec<WordSchema> {
    vec![
        WordSchema {
            name: "adjectives".into(),
            title: "Tillægsord".into(),
            dataset: PathBuf::from("adjectives.csv"),
            columns: labels(&["English", "Positiv", "Komparativ", "Superlativ"]),
            gloss: 0,
            prompt: 1,
            answers: vec![
                answer(2, "Comparative (more)"),
                answer(3, "Superlative (most)"),
            ],
            mode: SelectionMode::Unique,
        },
        WordSchema {
            name: "nouns".into(),
            title: "Bydeform".into(),
            dataset: PathBuf::from("nouns.csv"),
            columns: labels(&[
                "English",
                "Navneform",
                "Ental Ubestemt",
                "Ental Bestemt",
                "Flertal Ubestemt",
                "Flertal Bestemt",
            ]),
            gloss: 0,
            prompt: 1,
            answers: vec![
                answer(2, "Ental Ubestemt (a)"),
                answer(3, "Ental Bestemt (the)"),
                answer(4, "Flertal Ubestemt (some)"),
                answer(5, "Flertal Bestemt (these)"),
            ],
            mode: SelectionMode::Unique,
        },
        WordSchema {
            name: "verbs".into(),
            title: "Infinitiv".into(),
            dataset: PathBuf::from("udsagnsord.csv"),
            columns: labels(&[
                "English",
                "Infinitiv",
                "Stem",
                "Imperative",
                "Præsens",
                "Datid",
                "Perfektum",
            ]),
            gloss: 0,
            prompt: 1,
            answers: vec![
                answer(3, "Imperative"),
                answer(4, "Præsens"),
                answer(5, "Datid"),
                answer(6, "Perfektum"),
            ],
            mode: SelectionMode::Repeat,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_mode_display_and_parse() {
        assert_eq!(SelectionMode::Unique.to_string(), "unique");
        assert_eq!(SelectionMode::Repeat.to_string(), "repeat");
        assert_eq!(
            "Repeat".parse::<SelectionMode>().unwrap(),
            SelectionMode::Repeat
        );
        assert_eq!(
            "without-replacement".parse::<SelectionMode>().unwrap(),
            SelectionMode::Unique
        );
        assert!("shuffle".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn builtins_are_valid() {
        for schema in builtin_schemas() {
            schema.validate().unwrap();
        }
    }

    #[test]
    fn builtin_arities() {
        let arities: Vec<(String, usize)> = builtin_schemas()
            .into_iter()
            .map(|s| (s.name.clone(), s.arity()))
            .collect();
        assert_eq!(
            arities,
            vec![
                ("adjectives".to_string(), 4),
                ("nouns".to_string(), 6),
                ("verbs".to_string(), 7),
            ]
        );
    }

    #[test]
    fn verbs_skip_the_stem_column() {
        let verbs = builtin_schemas().pop().unwrap();
        assert_eq!(verbs.label(2), "Stem");
        assert!(verbs.answers.iter().all(|a| a.column != 2));
        assert_eq!(verbs.mode, SelectionMode::Repeat);
    }

    #[test]
    fn validate_rejects_answering_the_prompt() {
        let mut schema = builtin_schemas().remove(0);
        schema.answers.push(answer(1, "Positive"));
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("also displayed"));
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let mut schema = builtin_schemas().remove(0);
        schema.answers[0].column = 9;
        assert!(schema.validate().is_err());

        let mut schema = builtin_schemas().remove(0);
        schema.prompt = 4;
        assert!(schema.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_answers() {
        let mut schema = builtin_schemas().remove(0);
        schema.answers[1].column = 2;
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn schema_from_toml() {
        let schema: WordSchema = toml::from_str(
            r#"
title = "Verbum"
dataset = "verbs-short.csv"
columns = ["English", "Imperativ", "Præsens", "Datid", "Perfektum"]
prompt = 0
mode = "with-replacement"

[[answers]]
column = 1
question = "Imperativ"

[[answers]]
column = 2
question = "Præsens"
"#,
        )
        .unwrap();
        assert_eq!(schema.gloss, 0);
        assert_eq!(schema.mode, SelectionMode::Repeat);
        assert_eq!(schema.answers.len(), 2);
    }
}
