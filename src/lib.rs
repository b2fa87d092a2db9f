//! Mutantscan: mutant DNA detection node. Classify once, remember forever, count.
//!
//! # Architecture
//!
//! ```text
//! HTTP (axum) / CLI
//!   │
//!   └── Node (config + store)
//!         │
//!         └── Ledger ── DnaRepository ── MemoryStore | SqliteStore
//!               │
//!               └── is_mutant(&Grid)   (pure pattern detector)
//! ```
//!
//! A grid is an N×N matrix of symbols. It is a mutant when it holds more than
//! one run of four equal symbols across rows, columns and diagonals (see
//! [`core::detector`] for the exact counting rule). The ledger keys every grid
//! by its row-major concatenation, so each distinct grid is classified and
//! stored exactly once.
//!
//! # Features
//!
//! - `native` (default) - SQLite store, node config, HTTP server, CLI, tokio runtime
//!
//! # Usage
//!
//! ```ignore
//! use mutantscan::{Grid, Node, NodeConfig};
//!
//! let node = Node::from_config(NodeConfig::new("myapp").in_memory())?;
//! let grid = Grid::new(["AAAA", "CAGT", "TTTT", "AGAG"])?;
//! assert!(node.classify(&grid)?);
//!
//! let stats = node.stats()?;
//! assert_eq!(stats.count_mutant_dna, 1);
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod core;
pub mod error;
pub mod ledger;
pub mod store;

// =============================================================================
// Native-only modules (server, CLI, filesystem, tokio)
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod node;
#[cfg(feature = "native")]
pub mod runtime;
#[cfg(feature = "native")]
pub mod server;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use crate::core::{is_mutant, Grid};
pub use error::{Error, GridError, Result};
pub use ledger::{ClassificationRecord, DnaRepository, Ledger, Stats};
pub use store::MemoryStore;

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use node::{DatabaseConfig, Node, NodeConfig};
#[cfg(feature = "native")]
pub use runtime::{install_signal_handlers, Shutdown};
#[cfg(feature = "native")]
pub use server::{create_router, create_router_with_name};
#[cfg(feature = "native")]
pub use store::SqliteStore;
