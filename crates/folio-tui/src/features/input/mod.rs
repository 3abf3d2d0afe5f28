//! Command prompt slice.
//!
//! - `text_buffer.rs`: single-line edit buffer
//! - `state.rs`: buffer plus command history
//! - `update.rs`: editing and submission keys
//! - `render.rs`: prompt line and cursor placement

mod render;
mod state;
mod text_buffer;
mod update;

pub use render::{input_cursor_position, render_input};
pub use state::{HISTORY_LIMIT, InputState};
pub use text_buffer::{CursorMove, TextBuffer};
pub use update::{KeyOutcome, handle_key, handle_paste};
