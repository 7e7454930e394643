//! The quiz session loop.
//!
//! A session owns the dataset, the seen set and the statistics. Each round
//! draws a word, asks for every answer field, grades the answers, logs the
//! record to the matching outcome log and updates the counters. In unique
//! mode the session terminates once every word has been drawn; in repeat
//! mode it runs until the answer source ends.

use std::path::Path;

use anyhow::Result;
use rand::Rng;

use crate::dataset::{Dataset, WordRecord};
use crate::error::DrillError;
use crate::grading::{grade, Grade, Outcome};
use crate::outcome_log::{self, LogLayout, LogWrite};
use crate::schema::{SelectionMode, WordSchema};
use crate::selector::{next_word, SeenSet};
use crate::stats::SessionStats;

/// Source of the learner's typed answers.
pub trait AnswerSource {
    /// Ask `question` and return the raw answer, or `None` once input has
    /// ended (e.g. end of file on stdin).
    fn answer(&mut self, question: &str) -> Result<Option<String>>;
}

/// Observer of session progress, typically a console renderer.
pub trait RoundReporter {
    fn on_start(&self, schema: &WordSchema, dataset: &Dataset, mode: SelectionMode);
    fn on_prompt(&self, schema: &WordSchema, record: &WordRecord);
    fn on_graded(&self, schema: &WordSchema, record: &WordRecord, grade: &Grade);
    fn on_logged(&self, outcome: Outcome, path: &Path, write: LogWrite);
}

/// No-op round reporter.
pub struct NoopReporter;

impl RoundReporter for NoopReporter {
    fn on_start(&self, _: &WordSchema, _: &Dataset, _: SelectionMode) {}
    fn on_prompt(&self, _: &WordSchema, _: &WordRecord) {}
    fn on_graded(&self, _: &WordSchema, _: &WordRecord, _: &Grade) {}
    fn on_logged(&self, _: Outcome, _: &Path, _: LogWrite) {}
}

/// Whether the session can still play rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// What a single call to [`Session::play_round`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
    /// A full round was played and logged.
    Played { record: WordRecord, grade: Grade },
    /// Every word has been seen; the session is now terminated.
    Exhausted,
    /// Input ended mid-round; nothing was recorded.
    Interrupted,
}

/// How a session run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every word was drawn (unique mode only).
    Completed(SessionStats),
    /// The answer source ended before the session did.
    Interrupted(SessionStats),
}

impl SessionEnd {
    pub fn stats(&self) -> &SessionStats {
        match self {
            SessionEnd::Completed(stats) | SessionEnd::Interrupted(stats) => stats,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionEnd::Completed(_))
    }
}

/// One drill over one dataset.
pub struct Session<R> {
    schema: WordSchema,
    dataset: Dataset,
    mode: SelectionMode,
    layout: LogLayout,
    rng: R,
    seen: SeenSet,
    stats: SessionStats,
    state: SessionState,
}

impl<R: Rng> Session<R> {
    /// Create a session after checking the schema and that the dataset is
    /// non-empty and matches the schema's arity.
    pub fn new(
        schema: WordSchema,
        dataset: Dataset,
        mode: SelectionMode,
        layout: LogLayout,
        rng: R,
    ) -> Result<Self, DrillError> {
        schema.validate()?;
        if dataset.is_empty() {
            return Err(DrillError::EmptyDataset(dataset.path().to_path_buf()));
        }
        dataset.check_arity(&schema)?;

        Ok(Self {
            schema,
            dataset,
            mode,
            layout,
            rng,
            seen: SeenSet::new(),
            stats: SessionStats::new(),
            state: SessionState::Running,
        })
    }

    pub fn schema(&self) -> &WordSchema {
        &self.schema
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Path of the outcome log this session writes for `outcome`.
    pub fn log_path(&self, outcome: Outcome) -> std::path::PathBuf {
        self.layout.outcome_path(self.dataset.path(), outcome)
    }

    /// Play rounds until the session terminates or input ends.
    ///
    /// In repeat mode this only returns on interruption or error.
    pub fn run(
        &mut self,
        answers: &mut dyn AnswerSource,
        reporter: &dyn RoundReporter,
    ) -> Result<SessionEnd> {
        tracing::info!(
            class = %self.schema.name,
            words = self.dataset.len(),
            mode = %self.mode,
            "session started"
        );
        reporter.on_start(&self.schema, &self.dataset, self.mode);

        loop {
            match self.play_round(answers, reporter)? {
                Round::Played { .. } => {}
                Round::Exhausted => {
                    tracing::info!(
                        successes = self.stats.successes,
                        failures = self.stats.failures,
                        rate = self.stats.success_rate(),
                        "session completed"
                    );
                    return Ok(SessionEnd::Completed(self.stats.clone()));
                }
                Round::Interrupted => {
                    tracing::info!(rounds = self.stats.rounds(), "session interrupted");
                    return Ok(SessionEnd::Interrupted(self.stats.clone()));
                }
            }
        }
    }

    /// Play a single round.
    pub fn play_round(
        &mut self,
        answers: &mut dyn AnswerSource,
        reporter: &dyn RoundReporter,
    ) -> Result<Round> {
        if self.state == SessionState::Terminated {
            return Ok(Round::Exhausted);
        }

        let Some(record) = next_word(self.mode, &self.dataset, &self.seen, &mut self.rng).cloned()
        else {
            self.state = SessionState::Terminated;
            return Ok(Round::Exhausted);
        };
        tracing::debug!(prompt = record.field(self.schema.prompt), "word selected");

        reporter.on_prompt(&self.schema, &record);

        let mut typed = Vec::with_capacity(self.schema.answers.len());
        for field in &self.schema.answers {
            match answers.answer(&field.question)? {
                Some(answer) => typed.push(answer),
                None => return Ok(Round::Interrupted),
            }
        }

        if self.mode == SelectionMode::Unique {
            self.seen.insert(record.clone());
        }

        let grade = grade(&self.schema, &record, typed.as_slice())?;
        reporter.on_graded(&self.schema, &record, &grade);

        let outcome = grade.outcome();
        tracing::debug!(
            correct = grade.correct_count(),
            fields = grade.fields.len(),
            %outcome,
            "round graded"
        );
        let path = self.log_path(outcome);
        let write = outcome_log::append(&path, self.schema.header(), &record)?;
        reporter.on_logged(outcome, &path, write);

        self.stats.record(outcome, record.field(self.schema.prompt));

        Ok(Round::Played { record, grade })
    }
}
