//! Random word selection.
//!
//! Two policies: `next_unseen` draws without replacement against a
//! [`SeenSet`], `next_any` draws with replacement from the whole dataset.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::dataset::{Dataset, WordRecord};
use crate::schema::SelectionMode;

/// Records already presented in the current session.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    records: HashSet<WordRecord>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a record as seen. Returns `false` if it already was.
    pub fn insert(&mut self, record: WordRecord) -> bool {
        self.records.insert(record)
    }

    pub fn contains(&self, record: &WordRecord) -> bool {
        self.records.contains(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Uniformly random record not yet in `seen`, or `None` once every record
/// has been presented.
pub fn next_unseen<'a, R: Rng + ?Sized>(
    dataset: &'a Dataset,
    seen: &SeenSet,
    rng: &mut R,
) -> Option<&'a WordRecord> {
    let remaining: Vec<&WordRecord> = dataset.iter().filter(|r| !seen.contains(r)).collect();
    remaining.choose(rng).copied()
}

/// Uniformly random record from the whole dataset. Only `None` when the
/// dataset is empty.
pub fn next_any<'a, R: Rng + ?Sized>(dataset: &'a Dataset, rng: &mut R) -> Option<&'a WordRecord> {
    dataset.records().choose(rng)
}

/// Draw the next record according to `mode`.
pub fn next_word<'a, R: Rng + ?Sized>(
    mode: SelectionMode,
    dataset: &'a Dataset,
    seen: &SeenSet,
    rng: &mut R,
) -> Option<&'a WordRecord> {
    match mode {
        SelectionMode::Unique => next_unseen(dataset, seen, rng),
        SelectionMode::Repeat => next_any(dataset, rng),
    }
}
