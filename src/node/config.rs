//! Node Configuration - built from env / `.env`, or by higher layers directly

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::ledger::DnaRepository;
use crate::store::{MemoryStore, SqliteStore};

pub const DEFAULT_APP: &str = "mutantscan";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
const DB_FILE: &str = "mutants.sqlite";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),
    #[error("Empty database url")]
    EmptyDatabaseUrl,
}

/// Where classification records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Memory,
    Sqlite(PathBuf),
}

impl DatabaseConfig {
    /// `memory` / `:memory:` → in-memory, `sqlite://<path>` or a bare path → SQLite file.
    pub fn parse(url: &str) -> std::result::Result<Self, ConfigError> {
        let url = url.trim();
        match url.to_ascii_lowercase().as_str() {
            "" => Err(ConfigError::EmptyDatabaseUrl),
            "memory" | ":memory:" | "sqlite::memory:" => Ok(Self::Memory),
            _ => {
                let path = url.strip_prefix("sqlite://").unwrap_or(url);
                if path.is_empty() {
                    return Err(ConfigError::EmptyDatabaseUrl);
                }
                Ok(Self::Sqlite(PathBuf::from(path)))
            }
        }
    }

    /// `<root>/<app>/mutants.sqlite`, root from `MUTANTSCAN_ROOT` or the local data dir.
    pub fn default_for(app: &str) -> Self {
        let root = std::env::var("MUTANTSCAN_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")));
        Self::Sqlite(root.join(app).join(DB_FILE))
    }

    pub fn open(&self) -> Result<Arc<dyn DnaRepository>> {
        Ok(match self {
            Self::Memory => Arc::new(MemoryStore::new()),
            Self::Sqlite(path) => Arc::new(SqliteStore::open(path)?),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Memory => "memory".into(),
            Self::Sqlite(path) => format!("sqlite://{}", path.display()),
        }
    }
}

/// Node configuration. `database: None` resolves to [`DatabaseConfig::default_for`].
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub app: String,
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self { app: DEFAULT_APP.into(), host: DEFAULT_HOST.into(), port: DEFAULT_PORT, database: None }
    }
}

impl NodeConfig {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into(), ..Default::default() }
    }
    pub fn with_host(mut self, host: impl Into<String>) -> Self { self.host = host.into(); self }
    pub fn with_port(mut self, port: u16) -> Self { self.port = port; self }
    pub fn with_database(mut self, db: DatabaseConfig) -> Self { self.database = Some(db); self }
    pub fn in_memory(self) -> Self { self.with_database(DatabaseConfig::Memory) }

    /// Load `.env` from the working directory, then read the process environment.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        load_dotenv(Path::new(".env"));
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (`MUTANTSCAN_APP`, `MUTANTSCAN_HOST`,
    /// `MUTANTSCAN_PORT`, `DATABASE_URL`).
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> std::result::Result<Self, ConfigError> {
        let mut config = Self::new(var("MUTANTSCAN_APP").unwrap_or_else(|| DEFAULT_APP.into()));
        if let Some(host) = var("MUTANTSCAN_HOST") {
            config.host = host;
        }
        if let Some(port) = var("MUTANTSCAN_PORT") {
            config.port = parse_port(&port)?;
        }
        if let Some(url) = var("DATABASE_URL") {
            config.database = Some(DatabaseConfig::parse(&url)?);
        }
        Ok(config)
    }

    pub fn database(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_else(|| DatabaseConfig::default_for(&self.app))
    }

    pub fn addr(&self) -> String { format!("{}:{}", self.host, self.port) }
}

pub fn parse_port(value: &str) -> std::result::Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

/// Set `KEY=value` pairs from a dotenv file. Variables already set are left alone.
pub fn load_dotenv(path: &Path) {
    let Ok(contents) = std::fs::read_to_string(path) else { return };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().trim_start_matches("export ").trim();
            let value = value.trim().trim_matches('"');
            if !key.is_empty() && !value.is_empty() && std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}
