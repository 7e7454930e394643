//! Per-session counters.

use serde::{Deserialize, Serialize};

use crate::grading::Outcome;

/// Successes, failures and the prompts that were missed, for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub successes: u32,
    pub failures: u32,
    /// Prompt word of every failed round, in the order they were missed.
    pub misspelled: Vec<String>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished round.
    pub fn record(&mut self, outcome: Outcome, prompt: &str) {
        match outcome {
            Outcome::Successful => self.successes += 1,
            Outcome::Misspelled => {
                self.failures += 1;
                self.misspelled.push(prompt.to_string());
            }
        }
    }

    pub fn rounds(&self) -> u32 {
        self.successes + self.failures
    }

    /// Fraction of rounds answered correctly, 0.0 before the first round.
    pub fn success_rate(&self) -> f64 {
        match self.rounds() {
            0 => 0.0,
            n => self.successes as f64 / n as f64,
        }
    }
}
