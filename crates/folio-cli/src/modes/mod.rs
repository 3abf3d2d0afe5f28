//! Runtime execution modes.
//!
//! - `show`: non-interactive typing of one command's output to stdout
//! - `tui`: full-screen interactive UI (optional feature)

pub mod show;
pub mod stream;

#[cfg(feature = "tui")]
pub use folio_tui::run_interactive;

#[cfg(not(feature = "tui"))]
pub fn run_interactive(_config: &folio_core::Config) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
