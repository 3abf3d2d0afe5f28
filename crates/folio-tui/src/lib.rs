//! Full-screen terminal UI for folio.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Result, bail};
pub use features::{header, input, nav, output};
use folio_core::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive portfolio until the user quits.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        bail!(
            "The interactive portfolio needs a terminal.\n\
             Use `folio show <command>` for non-interactive output."
        );
    }

    tracing::info!(
        prompt = %config.prompt,
        policy = config.session_policy.as_str(),
        "starting interactive session"
    );
    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()
}
