//! Shared helpers for the TUI.

pub mod scrollbar;
pub mod text;

pub use scrollbar::Scrollbar;
pub use text::{sanitize_for_display, sanitize_single_line, truncate_with_ellipsis};
