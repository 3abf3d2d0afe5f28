//! Header slice: title and the live local date-time.

mod render;
mod state;

pub use render::render_header;
pub use state::{ClockState, format_datetime};
