//! Navigation bar slice.
//!
//! One row of clickable shortcuts. Each entry runs its command through the
//! shell exactly as if it had been typed.

mod render;
mod state;

pub use render::render_nav;
pub use state::{NavBar, NavEntry};
