//! Opens (or creates) the temporal database named in the settings and
//! makes sure every facet table exists.
//!
//! Usage: `strata [config-file]`. Without a file argument an optional
//! `strata.toml` in the working directory is read. `STRATA_DATABASE` and
//! `STRATA_LOG_FILTER` override whatever the file says.

use tracing::info;

use strata::persist::Persistor;
use strata::settings::{init_tracing, Settings};

fn main() -> strata::Result<()> {
    let path = std::env::args().nth(1);
    let settings = Settings::load(path.as_deref())?;
    init_tracing(&settings.log_filter);
    let mode = settings.persistence_mode();
    let persistor = Persistor::new(mode.clone())?;
    persistor.create_temporal_database()?;
    info!(?mode, "temporal database ready");
    Ok(())
}
