//! Clock state.

use chrono::{DateTime, Local, TimeZone};

/// Refresh period of the header clock.
pub const CLOCK_REFRESH_MS: u64 = 1_000;

/// Formats a timestamp the way the header shows it, e.g.
/// `10/19/2026, 3:04:05 PM`.
pub fn format_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Cached header text, refreshed once per second.
#[derive(Debug, Clone, Default)]
pub struct ClockState {
    text: String,
    /// Runtime ms of the last refresh.
    refreshed_at: Option<u64>,
}

impl ClockState {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Refreshes the text when a second has passed. Returns true if it changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self
            .refreshed_at
            .is_some_and(|at| now_ms.saturating_sub(at) < CLOCK_REFRESH_MS)
        {
            return false;
        }
        self.refreshed_at = Some(now_ms);
        self.set(format_datetime(&Local::now()))
    }

    fn set(&mut self, text: String) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }
}
