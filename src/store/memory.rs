//! In-memory store. Used by tests and by servers started with `DATABASE_URL=memory`.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::ledger::{ClassificationRecord, DnaRepository};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, ClassificationRecord>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> Result<usize> {
        let guard = self.inner.read().map_err(|_| Error::unavailable("memory store lock"))?;
        Ok(guard.records.len())
    }

    pub fn is_empty(&self) -> Result<bool> { Ok(self.len()? == 0) }
}

impl DnaRepository for MemoryStore {
    fn find_by_key(&self, key: &str) -> Result<Option<ClassificationRecord>> {
        let guard = self.inner.read().map_err(|_| Error::unavailable("memory store lock"))?;
        Ok(guard.records.get(key).cloned())
    }

    fn insert(&self, key: &str, is_mutant: bool) -> Result<ClassificationRecord> {
        let mut guard = self.inner.write().map_err(|_| Error::unavailable("memory store lock"))?;
        if guard.records.contains_key(key) {
            return Err(Error::IntegrityConflict { key: key.to_owned() });
        }
        guard.next_id += 1;
        let record = ClassificationRecord {
            id: guard.next_id,
            sequence: key.to_owned(),
            is_mutant,
            created_at: Utc::now(),
        };
        guard.records.insert(key.to_owned(), record.clone());
        Ok(record)
    }

    fn count_by_verdict(&self, is_mutant: bool) -> Result<u64> {
        let guard = self.inner.read().map_err(|_| Error::unavailable("memory store lock"))?;
        Ok(guard.records.values().filter(|r| r.is_mutant == is_mutant).count() as u64)
    }
}
