//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the boundary where side effects happen. The reducer stays pure and
//! returns effects; this module carries them out.

mod handlers;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use folio_core::Config;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, Tui};
use crate::{render, update};

/// Frame cadence while typing or interacting (about 60 fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll timeout when nothing is animating.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen runtime. The terminal is restored when it drops.
pub struct TuiRuntime {
    terminal: Tui,
    pub state: AppState,
    /// Origin of the runtime clock fed to the engine.
    started: Instant,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: &Config) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config),
            started: now,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            // Layout must be current before any other event is reduced.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                match &event {
                    UiEvent::Terminal(_) => {
                        self.last_terminal_event = Instant::now();
                        dirty = true;
                    }
                    UiEvent::Tick { .. } => dirty = true,
                    _ => {}
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        tracing::info!("event loop finished");
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Polls the terminal until the next tick is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let recent_input = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.is_busy() || recent_input {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        let mut terminal = Vec::new();
        let poll_duration = tick_interval.saturating_sub(self.last_tick.elapsed());
        if event::poll(poll_duration)? {
            terminal.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                terminal.push(event::read()?);
            }
        }

        let tick_due = self.last_tick.elapsed() >= tick_interval;
        let events = frame_events(terminal, self.now_ms(), tick_due);
        if matches!(events.first(), Some(UiEvent::Tick { .. })) {
            self.last_tick = Instant::now();
        }
        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::OpenLink { url } => {
                if let Err(e) = handlers::open_link(&url) {
                    tracing::warn!("{e:#}");
                }
            }
            UiEffect::ReadClipboard => match handlers::read_clipboard() {
                Ok(text) => self.dispatch_event(UiEvent::ClipboardText(text)),
                Err(e) => tracing::warn!("{e:#}"),
            },
        }
    }
}

/// Orders one loop iteration's events.
///
/// A Tick precedes any terminal input, so a command submitted now is
/// scheduled from the current time and not from the previous tick.
fn frame_events(terminal: Vec<Event>, now_ms: u64, tick_due: bool) -> Vec<UiEvent> {
    let mut events = Vec::with_capacity(terminal.len() + 1);
    if tick_due || !terminal.is_empty() {
        events.push(UiEvent::Tick { now_ms });
    }
    events.extend(terminal.into_iter().map(UiEvent::Terminal));
    events
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
