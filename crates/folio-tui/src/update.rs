//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use folio_core::{Completion, Outcome};
use ratatui::layout::{Position, Rect};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::input::{self, KeyOutcome};
use crate::features::output::{self, ScrollCommand};
use crate::render::layout_areas;
use crate::state::AppState;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick { now_ms } => {
            handle_tick(app, now_ms);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.areas = layout_areas(Rect::new(0, 0, width, height), !app.nav.is_empty());
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::ClipboardText(text) => {
            input::handle_paste(&mut app.input, &text);
            vec![]
        }
    };
    sync_output(app);
    effects
}

/// Runs a command line through the shell, as typed or from a shortcut.
fn run_command(app: &mut AppState, line: &str) {
    match app.shell.process_command(line) {
        Outcome::Ignored => {}
        Outcome::Ran { command, session } | Outcome::NotFound { command, session } => {
            tracing::debug!(command = %command, session = ?session.map(|s| s.0), "command dispatched");
        }
    }
}

fn handle_tick(app: &mut AppState, now_ms: u64) {
    app.now_ms = now_ms;

    if app
        .startup
        .as_ref()
        .is_some_and(|startup| now_ms >= startup.due_ms)
        && let Some(startup) = app.startup.take()
    {
        tracing::info!(command = %startup.command, "running startup command");
        run_command(app, &startup.command);
    }

    app.shell.engine_mut().advance_to(now_ms);
    for event in app.shell.engine_mut().drain_events() {
        tracing::trace!(?event, "engine event");
    }
    app.clock.tick(now_ms);
}

fn sync_output(app: &mut AppState) {
    let area = app.areas.output;
    let margin = app.output_margin;
    app.output.sync(app.shell.engine().target(), area, margin);
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => {
            input::handle_paste(&mut app.input, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(effects) = handle_global_key(app, key) {
        return effects;
    }

    match input::handle_key(&mut app.input, key) {
        KeyOutcome::Submit(line) => run_command(app, &line),
        KeyOutcome::Complete(text) => match app.shell.complete(&text) {
            Completion::Unique(completed) => app.input.set_text(&completed),
            Completion::Many(_) | Completion::None => {}
        },
        KeyOutcome::Edited | KeyOutcome::Unhandled => {}
    }
    vec![]
}

/// Keys that act on the whole app rather than the prompt.
fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let ctrl = key.modifiers == KeyModifiers::CONTROL;
    let alt = key.modifiers == KeyModifiers::ALT;

    let effects = match key.code {
        KeyCode::Char('c') if ctrl => {
            if app.input.is_empty() {
                vec![UiEffect::Quit]
            } else {
                app.input.clear();
                vec![]
            }
        }
        KeyCode::Char('d') if ctrl && app.input.is_empty() => vec![UiEffect::Quit],
        KeyCode::Esc => {
            if app.input.is_empty() {
                vec![UiEffect::Quit]
            } else {
                app.input.clear();
                vec![]
            }
        }
        KeyCode::Char('l') if ctrl => {
            run_command(app, "clear");
            vec![]
        }
        KeyCode::Char('v') if ctrl => vec![UiEffect::ReadClipboard],
        KeyCode::Char(digit @ '1'..='9') if alt => {
            let index = digit as usize - '1' as usize;
            if let Some(command) = app.nav.entries().get(index).map(|e| e.command.clone()) {
                run_command(app, &command);
            }
            vec![]
        }
        KeyCode::PageUp => scroll(app, ScrollCommand::PageUp),
        KeyCode::PageDown => scroll(app, ScrollCommand::PageDown),
        KeyCode::Home if ctrl => scroll(app, ScrollCommand::Top),
        KeyCode::End if ctrl => scroll(app, ScrollCommand::Bottom),
        _ => return None,
    };
    Some(effects)
}

fn scroll(app: &mut AppState, command: ScrollCommand) -> Vec<UiEffect> {
    output::handle_scroll(&mut app.output, command);
    vec![]
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let nav = app.areas.nav;
    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
        && nav.contains(Position::new(mouse.column, mouse.row))
    {
        let column = usize::from(mouse.column - nav.x);
        if let Some(command) = app.nav.command_at(column).map(str::to_string) {
            run_command(app, &command);
        }
        return vec![];
    }

    match output::handle_mouse(&mut app.output, mouse) {
        Some(url) => vec![UiEffect::OpenLink { url }],
        None => vec![],
    }
}
