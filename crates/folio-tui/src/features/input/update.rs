//! Input reducer.
//!
//! Handles editing keys, history navigation, completion, and submission.
//! Keys it does not own come back as [`KeyOutcome::Unhandled`] so the
//! app-level reducer can try them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::CursorMove;
use super::state::InputState;
use crate::common::sanitize_single_line;

/// What a key did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The buffer changed (or the key was consumed without effect).
    Edited,
    /// Enter: the line to run.
    Submit(String),
    /// Tab: the line to complete.
    Complete(String),
    /// Not an input key.
    Unhandled,
}

/// Replaces the prompt content with pasted text.
pub fn handle_paste(input: &mut InputState, text: &str) {
    input.reset_navigation();
    input.set_text(&sanitize_single_line(text));
}

/// Applies one key to the prompt.
pub fn handle_key(input: &mut InputState, key: KeyEvent) -> KeyOutcome {
    let mods = Modifiers::from(&key);

    handle_submission(input, key.code, &mods)
        .or_else(|| handle_line_editing(input, key.code, &mods))
        .or_else(|| handle_word_editing(input, key.code, &mods))
        .or_else(|| handle_navigation(input, key.code, &mods))
        .unwrap_or_else(|| handle_default_input(input, key.code, &mods))
}

/// Parsed key modifiers.
struct Modifiers {
    ctrl: bool,
    alt: bool,
}

impl Modifiers {
    fn from(key: &KeyEvent) -> Self {
        Self {
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            alt: key.modifiers.contains(KeyModifiers::ALT),
        }
    }

    fn none(&self) -> bool {
        !self.ctrl && !self.alt
    }

    fn only_ctrl(&self) -> bool {
        self.ctrl && !self.alt
    }

    fn only_alt(&self) -> bool {
        self.alt && !self.ctrl
    }
}

fn handle_submission(input: &mut InputState, code: KeyCode, mods: &Modifiers) -> Option<KeyOutcome> {
    match code {
        KeyCode::Enter if !mods.ctrl && !mods.alt => Some(KeyOutcome::Submit(input.submit())),
        KeyCode::Tab if mods.none() => Some(KeyOutcome::Complete(input.text().to_string())),
        _ => None,
    }
}

// Ctrl+A, Ctrl+E, Ctrl+U, Ctrl+K
fn handle_line_editing(input: &mut InputState, code: KeyCode, mods: &Modifiers) -> Option<KeyOutcome> {
    if !mods.only_ctrl() {
        return None;
    }
    match code {
        KeyCode::Char('a') => input.buffer.move_cursor(CursorMove::Head),
        KeyCode::Char('e') => input.buffer.move_cursor(CursorMove::End),
        KeyCode::Char('u') => {
            input.reset_navigation();
            input.buffer.delete_to_head();
        }
        KeyCode::Char('k') => {
            input.reset_navigation();
            input.buffer.delete_to_end();
        }
        _ => return None,
    }
    Some(KeyOutcome::Edited)
}

// Ctrl+W, Alt+Backspace, Alt+B/F
fn handle_word_editing(input: &mut InputState, code: KeyCode, mods: &Modifiers) -> Option<KeyOutcome> {
    match code {
        KeyCode::Char('w') if mods.only_ctrl() => {
            input.reset_navigation();
            input.buffer.delete_word_left();
        }
        KeyCode::Backspace if mods.only_alt() => {
            input.reset_navigation();
            input.buffer.delete_word_left();
        }
        KeyCode::Char('b') if mods.only_alt() => input.buffer.move_word_left(),
        KeyCode::Char('f') if mods.only_alt() => input.buffer.move_word_right(),
        KeyCode::Left if mods.only_ctrl() || mods.only_alt() => input.buffer.move_word_left(),
        KeyCode::Right if mods.only_ctrl() || mods.only_alt() => input.buffer.move_word_right(),
        _ => return None,
    }
    Some(KeyOutcome::Edited)
}

fn handle_navigation(input: &mut InputState, code: KeyCode, mods: &Modifiers) -> Option<KeyOutcome> {
    if !mods.none() {
        return None;
    }
    match code {
        KeyCode::Up => input.navigate_up(),
        KeyCode::Down => input.navigate_down(),
        KeyCode::Left => input.buffer.move_cursor(CursorMove::Back),
        KeyCode::Right => input.buffer.move_cursor(CursorMove::Forward),
        KeyCode::Home => input.buffer.move_cursor(CursorMove::Head),
        KeyCode::End => input.buffer.move_cursor(CursorMove::End),
        _ => return None,
    }
    Some(KeyOutcome::Edited)
}

fn handle_default_input(input: &mut InputState, code: KeyCode, mods: &Modifiers) -> KeyOutcome {
    match code {
        KeyCode::Char(ch) if !mods.ctrl && !mods.alt => {
            input.reset_navigation();
            input.buffer.insert_char(ch);
        }
        KeyCode::Backspace if mods.none() => {
            input.reset_navigation();
            input.buffer.delete_prev_char();
        }
        KeyCode::Delete if mods.none() => {
            input.reset_navigation();
            input.buffer.delete_next_char();
        }
        _ => return KeyOutcome::Unhandled,
    }
    KeyOutcome::Edited
}
