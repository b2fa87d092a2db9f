//! Core: grid value type and the pattern detector. No I/O, compiles everywhere.

pub mod detector;
pub mod grid;

pub use detector::{is_mutant, RUN_LENGTH};
pub use grid::Grid;
