//! SQLite store. One connection behind a mutex; `sequence` is UNIQUE in the schema.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::{Error, Result};
use crate::ledger::{ClassificationRecord, DnaRepository};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS dna_sequence (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        sequence    TEXT    NOT NULL UNIQUE,
        is_mutant   INTEGER NOT NULL,
        created_at  TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_dna_sequence_is_mutant ON dna_sequence(is_mutant);
";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and apply the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::unavailable(format!("mkdir: {e}")))?;
            }
        }
        let conn = Connection::open(path).map_err(|e| Error::unavailable(format!("open {}: {e}", path.display())))?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )
        .map_err(Error::unavailable)?;
        debug!(path = %path.display(), "opened sqlite store");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::unavailable)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).map_err(|e| Error::unavailable(format!("schema: {e}")))?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::unavailable("sqlite connection lock"))
    }
}

impl DnaRepository for SqliteStore {
    fn find_by_key(&self, key: &str) -> Result<Option<ClassificationRecord>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, sequence, is_mutant, created_at FROM dna_sequence WHERE sequence = ?1",
                params![key],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, bool>(2)?, row.get::<_, String>(3)?)),
            )
            .optional()
            .map_err(Error::unavailable)?;

        row.map(|(id, sequence, is_mutant, created_at)| {
            Ok(ClassificationRecord { id, sequence, is_mutant, created_at: parse_timestamp(&created_at)? })
        })
        .transpose()
    }

    fn insert(&self, key: &str, is_mutant: bool) -> Result<ClassificationRecord> {
        let conn = self.conn()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO dna_sequence (sequence, is_mutant, created_at) VALUES (?1, ?2, ?3)",
            params![key, is_mutant, created_at.to_rfc3339()],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref f, _) if f.code == ErrorCode::ConstraintViolation => {
                Error::IntegrityConflict { key: key.to_owned() }
            }
            other => Error::unavailable(format!("insert: {other}")),
        })?;

        Ok(ClassificationRecord { id: conn.last_insert_rowid(), sequence: key.to_owned(), is_mutant, created_at })
    }

    fn count_by_verdict(&self, is_mutant: bool) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM dna_sequence WHERE is_mutant = ?1", params![is_mutant], |row| row.get(0))
            .map_err(Error::unavailable)?;
        Ok(count as u64)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::unavailable(format!("created_at '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn insert_find_count_in_memory() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.find_by_key("AAAACAGTTTTTAGAG").unwrap().is_none());

        let record = store.insert("AAAACAGTTTTTAGAG", true).unwrap();
        store.insert("ACGTGATCTCAGCGTA", false).unwrap();

        let found = store.find_by_key("AAAACAGTTTTTAGAG").unwrap().unwrap();
        assert_eq!(found.id, record.id);
        assert!(found.is_mutant);
        assert_eq!(found.created_at.timestamp(), record.created_at.timestamp());
        assert_eq!(store.count_by_verdict(true).unwrap(), 1);
        assert_eq!(store.count_by_verdict(false).unwrap(), 1);
    }

    #[test]
    fn unique_violation_is_integrity_conflict() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert("AAAA", true).unwrap();
        let err = store.insert("AAAA", true).unwrap_err();
        assert!(matches!(err, Error::IntegrityConflict { ref key } if key == "AAAA"));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("mutants.sqlite");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert("ATGCATGCATGCATGC", true).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert!(store.find_by_key("ATGCATGCATGCATGC").unwrap().unwrap().is_mutant);
        assert_eq!(store.count_by_verdict(true).unwrap(), 1);
    }
}
