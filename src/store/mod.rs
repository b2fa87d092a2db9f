//! Storage backends implementing [`DnaRepository`](crate::ledger::DnaRepository).

mod memory;
#[cfg(feature = "native")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "native")]
pub use sqlite::SqliteStore;
