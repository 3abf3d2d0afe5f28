//! Feature slices for the TUI (state/update/render per slice).

pub mod header;
pub mod input;
pub mod nav;
pub mod output;
