//! Terminal rendering and stdin answers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color as TableColor, Table};
use crossterm::style::{Color, Stylize};

use drill_core::dataset::{Dataset, WordRecord};
use drill_core::grading::{Grade, Outcome};
use drill_core::outcome_log::LogWrite;
use drill_core::schema::{SelectionMode, WordSchema};
use drill_core::session::{AnswerSource, RoundReporter};
use drill_core::stats::SessionStats;

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

/// `Tillægsord: god (good)` with the word green and the gloss yellow.
pub fn render_prompt(schema: &WordSchema, record: &WordRecord, color: bool) -> String {
    format!(
        "{}: {} ({})",
        schema.title,
        paint(record.field(schema.prompt), Color::Green, color),
        paint(record.field(schema.gloss), Color::Yellow, color),
    )
}

/// Table of field, typed answer and correct answer. Wrong answers are red,
/// right answers and expected forms green.
pub fn render_grade(
    schema: &WordSchema,
    record: &WordRecord,
    grade: &Grade,
    color: bool,
) -> String {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_BORDERS_ONLY_CONDENSED);
    if color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    table.set_header(vec![
        Cell::new(record.field(schema.prompt)).fg(TableColor::Yellow),
        Cell::new("Dit Svar"),
        Cell::new("Rigtig Svar"),
    ]);

    for field in &grade.fields {
        let given_color = if field.correct {
            TableColor::Green
        } else {
            TableColor::Red
        };
        table.add_row(vec![
            Cell::new(&field.label),
            Cell::new(&field.given).fg(given_color),
            Cell::new(&field.expected).fg(TableColor::Green),
        ]);
    }

    table.to_string()
}

/// End-of-session summary.
pub fn render_summary(stats: &SessionStats, words: usize, path: &Path) -> String {
    format!(
        "Successful answers: {}\nMissed answers: {}\nMisspelled words: {}\n\
         Congratulations — you completed dataset of {} words ({}).",
        stats.successes,
        stats.failures,
        stats.misspelled.join(", "),
        words,
        path.display(),
    )
}

/// Prints session progress to stdout.
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl RoundReporter for Console {
    fn on_start(&self, schema: &WordSchema, dataset: &Dataset, mode: SelectionMode) {
        println!(
            "Loaded {} {} from '{}' ({mode}).",
            dataset.len(),
            schema.name,
            dataset.path().display()
        );
        if mode == SelectionMode::Repeat {
            println!("Words repeat; press Ctrl-D to stop.");
        }
        println!();
    }

    fn on_prompt(&self, schema: &WordSchema, record: &WordRecord) {
        println!("{}", render_prompt(schema, record, self.color));
    }

    fn on_graded(&self, schema: &WordSchema, record: &WordRecord, grade: &Grade) {
        println!();
        println!("{}", render_grade(schema, record, grade, self.color));
        println!();
    }

    fn on_logged(&self, outcome: Outcome, path: &Path, write: LogWrite) {
        tracing::debug!(%outcome, path = %path.display(), ?write, "outcome logged");
    }
}

/// Reads one answer per line from stdin, echoing the question first.
pub struct StdinAnswers<R> {
    input: R,
}

impl StdinAnswers<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> StdinAnswers<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> AnswerSource for StdinAnswers<R> {
    fn answer(&mut self, question: &str) -> Result<Option<String>> {
        print!("{question}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            return Ok(None);
        }

        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(Some(answer.to_string()))
    }
}
