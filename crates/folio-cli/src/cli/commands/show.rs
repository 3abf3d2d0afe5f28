//! Show command handler.

use std::io::{self, IsTerminal};

use anyhow::Result;
use folio_core::Outcome;
use folio_core::config::Config;

use crate::interrupt;
use crate::modes::show::{ShowOptions, run_show};

pub async fn run(config: &Config, command: String, instant: bool, echo: bool) -> Result<()> {
    let cancel = interrupt::init()?;
    let stdout = io::stdout();
    let options = ShowOptions {
        command,
        instant,
        echo,
        styled: stdout.is_terminal(),
    };

    match run_show(config, &options, stdout.lock(), &cancel).await? {
        Outcome::Ignored => anyhow::bail!("No command given."),
        Outcome::Ran { .. } | Outcome::NotFound { .. } => Ok(()),
    }
}
