// Process level settings: which store to open and how much to log
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::persist::PersistenceMode;

/// Read from an optional `strata.toml` (or the file named on the command
/// line) and then from `STRATA_*` environment variables, which win.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Path of the SQLite file. Without one the store lives in memory.
    #[serde(default)]
    pub database: Option<String>,
    /// A `tracing_subscriber` filter directive such as `info` or `strata=debug`.
    pub log_filter: String,
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Settings> {
        let file = match path {
            Some(path) => File::with_name(path),
            None => File::with_name("strata").required(false),
        };
        let settings = Config::builder()
            .set_default("log_filter", "info")?
            .add_source(file)
            .add_source(Environment::with_prefix("STRATA"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        match &self.database {
            Some(path) => PersistenceMode::File(path.clone()),
            None => PersistenceMode::InMemory,
        }
    }
}

/// Installs the global fmt subscriber. Calling it again is a no-op.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}
