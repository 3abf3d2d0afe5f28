//! Non-interactive mode: run one command and type its output to stdout.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use folio_core::{Config, Outcome, Shell, TypingConfig};
use tokio_util::sync::CancellationToken;

use super::stream::StreamTarget;
use crate::interrupt::InterruptedError;

#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub command: String,
    /// Skip the typing delays.
    pub instant: bool,
    /// Echo the command after the prompt before its output.
    pub echo: bool,
    /// Underline links with ANSI escapes.
    pub styled: bool,
}

/// Runs `options.command` and streams its animated output into `out`.
///
/// The clock is virtual: the loop sleeps until the engine's next deadline and
/// then advances it there. Cancelling `cancel` stops the animation, keeps what
/// was typed, and returns [`InterruptedError`].
pub async fn run_show<W: Write>(
    config: &Config,
    options: &ShowOptions,
    out: W,
    cancel: &CancellationToken,
) -> Result<Outcome> {
    let mut config = config.clone();
    if options.instant {
        config.typing = TypingConfig::instant();
    }

    let target = StreamTarget::new(out, options.styled).with_echo(options.echo);
    let mut shell = Shell::from_config(&config, target);
    let outcome = shell.process_command(&options.command);
    tracing::debug!(?outcome, "show command started");

    let engine = shell.engine_mut();
    let mut interrupted = false;
    while engine.is_animating() {
        let Some(due) = engine.next_deadline() else {
            break;
        };
        let wait = Duration::from_millis(due.saturating_sub(engine.now()));
        tokio::select! {
            () = cancel.cancelled() => {
                engine.cancel_all();
                interrupted = true;
                break;
            }
            () = tokio::time::sleep(wait) => engine.advance_to(due),
        }
    }

    shell.into_engine().into_target().finish()?;
    if interrupted {
        return Err(InterruptedError.into());
    }
    Ok(outcome)
}
