//! Persistence port consumed by the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A persisted classification. Created once per canonical key, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub id: i64,
    /// Canonical key of the classified grid.
    pub sequence: String,
    pub is_mutant: bool,
    pub created_at: DateTime<Utc>,
}

/// Storage backend for classification records.
///
/// Implementations must enforce uniqueness of `sequence` and report a
/// duplicate insert as [`Error::IntegrityConflict`](crate::Error::IntegrityConflict).
pub trait DnaRepository: Send + Sync {
    fn find_by_key(&self, key: &str) -> Result<Option<ClassificationRecord>>;
    fn insert(&self, key: &str, is_mutant: bool) -> Result<ClassificationRecord>;
    fn count_by_verdict(&self, is_mutant: bool) -> Result<u64>;
}
