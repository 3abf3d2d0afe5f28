//! Interactive mode handler.

use anyhow::Result;
use folio_core::config::{Config, paths};
use folio_core::logging;

use crate::modes;

pub fn run(config: &Config) -> Result<()> {
    // The terminal belongs to the UI, so logs go to a file.
    let _guard = logging::init_file_logging(&paths::logs_dir())?;
    modes::run_interactive(config)
}
