//! UI events.
//!
//! Everything the reducer reacts to arrives as a [`UiEvent`]: terminal input,
//! frame sizes, timer ticks, and results of effects the runtime executed.

use crossterm::event::Event;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Periodic tick carrying the runtime clock in ms since startup.
    Tick { now_ms: u64 },

    /// Current terminal size, sent before any other event of a frame.
    Frame { width: u16, height: u16 },

    /// Raw terminal input.
    Terminal(Event),

    /// Text read from the system clipboard.
    ClipboardText(String),
}
