//! Error taxonomy shared by the ledger, the stores and the HTTP layer.
//!
//! `GridError` is raised before a `Grid` exists; `Error` only by storage.

/// Why a list of rows is not a valid grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("DNA must contain at least one row")]
    Empty,
    #[error("Each DNA string must have the same length (row {row} has {actual}, expected {expected})")]
    NotSquare { row: usize, expected: usize, actual: usize },
    #[error("DNA row {row} contains a non-ASCII symbol")]
    NonAscii { row: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record for this key already exists. Raised by stores on duplicate insert.
    #[error("record already exists for sequence of length {}", .key.len())]
    IntegrityConflict { key: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    pub fn unavailable(reason: impl std::fmt::Display) -> Self {
        Self::Unavailable(reason.to_string())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::IntegrityConflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
