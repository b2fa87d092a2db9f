//! Node - the ledger bound to a configured store
//!
//! The server and the CLI both go through `Node`, so they share one way of
//! opening storage.

mod config;

pub use config::{load_dotenv, parse_port, ConfigError, DatabaseConfig, NodeConfig};

use std::sync::Arc;
use tracing::info;

use crate::core::Grid;
use crate::error::Result;
use crate::ledger::{DnaRepository, Ledger, Stats};

#[derive(Clone)]
pub struct Node {
    ledger: Ledger,
    config: NodeConfig,
}

impl Node {
    /// Open the configured store and wrap it in a ledger.
    pub fn from_config(config: NodeConfig) -> Result<Self> {
        let database = config.database();
        let repo = database.open()?;
        info!(app = %config.app, database = %database.describe(), "node opened");
        Ok(Self { ledger: Ledger::new(repo), config })
    }

    /// Use an existing repository; `config.database` is ignored.
    pub fn with_repository(config: NodeConfig, repo: Arc<dyn DnaRepository>) -> Self {
        Self { ledger: Ledger::new(repo), config }
    }

    pub fn config(&self) -> &NodeConfig { &self.config }

    pub fn classify(&self, grid: &Grid) -> Result<bool> { self.ledger.classify(grid) }
    pub fn stats(&self) -> Result<Stats> { self.ledger.stats() }
}
