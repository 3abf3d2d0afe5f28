//! Output slice: the scrollback of echoed commands and typed payloads.

pub mod layout;
mod render;
mod scroll;
mod state;
mod update;

pub use layout::{HANGING_INDENT, Run, RunKind, VisualRow, layout_children};
pub use render::render_output;
pub use scroll::{ScrollMode, ScrollState};
pub use state::OutputView;
pub use update::{MOUSE_SCROLL_ROWS, ScrollCommand, handle_mouse, handle_scroll};
