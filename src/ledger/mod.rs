//! Ledger: deduplicating classify-and-record, plus population stats.
//!
//! # Flow
//!
//! ```text
//! classify(grid)
//!   │
//!   ├── find_by_key(canonical key) ── hit ──► stored verdict (no write)
//!   │
//!   └── miss ──► is_mutant(grid) ──► insert(key, verdict) ──► verdict
//!                                         │
//!                                         └── IntegrityConflict ──► re-read, stored verdict
//! ```
//!
//! The ledger holds no state of its own. All durable state lives behind
//! [`DnaRepository`], which must enforce key uniqueness.

pub mod port;

pub use port::{ClassificationRecord, DnaRepository};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::{is_mutant, Grid};
use crate::error::{Error, Result};

/// Counts of stored verdicts and the mutant ratio. Recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub count_mutant_dna: u64,
    pub count_human_dna: u64,
    pub ratio: f64,
}

impl Stats {
    /// `ratio = mutants / (mutants + humans)`, or 0 when nothing is stored.
    pub fn from_counts(count_mutant_dna: u64, count_human_dna: u64) -> Self {
        let total = count_mutant_dna + count_human_dna;
        let ratio = if total > 0 { count_mutant_dna as f64 / total as f64 } else { 0.0 };
        Self { count_mutant_dna, count_human_dna, ratio }
    }
}

#[derive(Clone)]
pub struct Ledger {
    repo: Arc<dyn DnaRepository>,
}

impl Ledger {
    pub fn new(repo: Arc<dyn DnaRepository>) -> Self { Self { repo } }

    /// Classify `grid`, reusing a stored verdict when the grid was seen before.
    pub fn classify(&self, grid: &Grid) -> Result<bool> {
        let key = grid.canonical_key();
        if let Some(record) = self.repo.find_by_key(key)? {
            debug!(id = record.id, is_mutant = record.is_mutant, "classification cache hit");
            return Ok(record.is_mutant);
        }

        let verdict = is_mutant(grid);
        match self.repo.insert(key, verdict) {
            Ok(record) => {
                info!(id = record.id, size = grid.size(), is_mutant = verdict, "recorded new classification");
                Ok(verdict)
            }
            Err(err) if err.is_conflict() => self.resolve_conflict(key, err),
            Err(err) => Err(err),
        }
    }

    /// A concurrent caller stored this key between our lookup and insert.
    fn resolve_conflict(&self, key: &str, err: Error) -> Result<bool> {
        match self.repo.find_by_key(key)? {
            Some(record) => {
                debug!(id = record.id, "insert lost race, using stored verdict");
                Ok(record.is_mutant)
            }
            None => {
                warn!(size = key.len(), "integrity conflict but no stored record");
                Err(err)
            }
        }
    }

    pub fn stats(&self) -> Result<Stats> {
        let mutants = self.repo.count_by_verdict(true)?;
        let humans = self.repo.count_by_verdict(false)?;
        Ok(Stats::from_counts(mutants, humans))
    }
}
