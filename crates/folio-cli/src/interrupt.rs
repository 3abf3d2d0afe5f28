//! Ctrl+C handling for non-interactive commands.
//!
//! The interactive UI reads Ctrl+C as a key in raw mode; everything else gets
//! a [`CancellationToken`] that the signal handler cancels.

use std::fmt;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

/// Returned when the user interrupted a command. `main` maps it to exit code 130.
#[derive(Debug)]
pub struct InterruptedError;

impl fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

/// Installs the Ctrl+C handler and returns the token it cancels.
pub fn init() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel()).context("Failed to set Ctrl+C handler")?;
    Ok(token)
}
