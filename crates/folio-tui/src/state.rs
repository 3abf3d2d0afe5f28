//! Application state.

use folio_core::{Config, OutputBuffer, Shell};
use ratatui::layout::Rect;

use crate::features::header::ClockState;
use crate::features::input::InputState;
use crate::features::nav::NavBar;
use crate::features::output::OutputView;
use crate::render::{Areas, layout_areas};

/// Text on the left of the header row.
pub const TITLE: &str = "folio · interactive portfolio";

/// The command that runs once shortly after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupCommand {
    pub command: String,
    pub due_ms: u64,
}

pub struct AppState {
    pub shell: Shell<OutputBuffer>,
    pub input: InputState,
    pub output: OutputView,
    pub nav: NavBar,
    pub clock: ClockState,
    /// Pending startup command; `None` once it ran (or when disabled).
    pub startup: Option<StartupCommand>,
    pub output_margin: usize,
    /// Latest runtime clock, in ms since startup.
    pub now_ms: u64,
    /// Screen areas for the latest frame size.
    pub areas: Areas,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let startup = (!config.startup_command.trim().is_empty()).then(|| StartupCommand {
            command: config.startup_command.clone(),
            due_ms: config.startup_delay_ms,
        });

        Self {
            shell: Shell::from_config(config, OutputBuffer::new()),
            input: InputState::new(),
            output: OutputView::new(),
            nav: NavBar::new(&config.nav),
            clock: ClockState::default(),
            startup,
            output_margin: usize::from(config.output_margin),
            now_ms: 0,
            areas: layout_areas(Rect::default(), !config.nav.is_empty()),
            should_quit: false,
        }
    }

    /// The output buffer the engine renders into.
    pub fn buffer(&self) -> &OutputBuffer {
        self.shell.engine().target()
    }

    /// True while something needs frequent ticks.
    pub fn is_busy(&self) -> bool {
        self.shell.engine().is_animating() || self.startup.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_command_from_config() {
        let state = AppState::new(&Config::default());
        assert_eq!(
            state.startup,
            Some(StartupCommand {
                command: "welcome".into(),
                due_ms: 200,
            })
        );
        assert!(state.is_busy());
    }

    #[test]
    fn test_blank_startup_command_is_disabled() {
        let config = Config {
            startup_command: "  ".into(),
            ..Config::default()
        };
        let state = AppState::new(&config);
        assert_eq!(state.startup, None);
        assert!(!state.is_busy());
    }
}
