//! Prompt input state.
//!
//! Holds the edit buffer, submitted-command history, and history navigation.

use super::{CursorMove, TextBuffer};

/// Maximum number of remembered commands.
pub const HISTORY_LIMIT: usize = 200;

#[derive(Debug, Default)]
pub struct InputState {
    pub buffer: TextBuffer,

    /// Submitted commands, oldest first.
    pub history: Vec<String>,

    /// Position while browsing history (`None` = editing a fresh line).
    pub history_index: Option<usize>,

    /// What the user had typed before browsing history.
    pub draft: Option<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Replaces the line, keeping history position.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.reset_navigation();
    }

    /// Takes the current line for execution and records it in history.
    ///
    /// Blank lines are returned but not recorded, and a command equal to the
    /// previous entry is recorded once.
    pub fn submit(&mut self) -> String {
        let line = self.buffer.take();
        self.reset_navigation();

        let trimmed = line.trim();
        if !trimmed.is_empty() && self.history.last().is_none_or(|last| last != trimmed) {
            self.history.push(trimmed.to_string());
            if self.history.len() > HISTORY_LIMIT {
                self.history.remove(0);
            }
        }
        line
    }

    pub fn reset_navigation(&mut self) {
        self.history_index = None;
        self.draft = None;
    }

    /// Steps back through history, saving the draft on the first step.
    pub fn navigate_up(&mut self) {
        if self.history.is_empty() {
            return;
        }

        match self.history_index {
            None => {
                self.draft = Some(self.buffer.text().to_string());
                self.history_index = Some(self.history.len() - 1);
            }
            Some(idx) if idx > 0 => self.history_index = Some(idx - 1),
            Some(_) => {}
        }

        if let Some(idx) = self.history_index
            && let Some(entry) = self.history.get(idx).cloned()
        {
            self.buffer.set_text(&entry);
        }
    }

    /// Steps forward through history; past the newest entry the draft returns.
    pub fn navigate_down(&mut self) {
        let Some(idx) = self.history_index else {
            return;
        };

        if idx + 1 < self.history.len() {
            self.history_index = Some(idx + 1);
            if let Some(entry) = self.history.get(idx + 1).cloned() {
                self.buffer.set_text(&entry);
            }
        } else {
            let draft = self.draft.take().unwrap_or_default();
            self.history_index = None;
            self.buffer.set_text(&draft);
            self.buffer.move_cursor(CursorMove::End);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputState {
        let mut input = InputState::new();
        input.buffer.insert_str(text);
        input
    }

    #[test]
    fn test_submit_records_trimmed_history() {
        let mut input = typed("  about ");
        assert_eq!(input.submit(), "  about ");
        assert_eq!(input.history, vec!["about".to_string()]);
        assert!(input.is_empty());
    }

    #[test]
    fn test_submit_skips_blank_and_repeated_lines() {
        let mut input = typed("help");
        input.submit();
        input.buffer.insert_str("help");
        input.submit();
        input.buffer.insert_str("   ");
        input.submit();
        assert_eq!(input.history, vec!["help".to_string()]);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut input = InputState::new();
        for i in 0..=HISTORY_LIMIT {
            input.buffer.insert_str(&format!("cmd{i}"));
            input.submit();
        }
        assert_eq!(input.history.len(), HISTORY_LIMIT);
        assert_eq!(input.history[0], "cmd1");
    }

    #[test]
    fn test_navigation_restores_draft() {
        let mut input = InputState::new();
        for cmd in ["about", "skills"] {
            input.buffer.insert_str(cmd);
            input.submit();
        }
        input.buffer.insert_str("pro");

        input.navigate_up();
        assert_eq!(input.text(), "skills");
        input.navigate_up();
        assert_eq!(input.text(), "about");
        input.navigate_up();
        assert_eq!(input.text(), "about");

        input.navigate_down();
        assert_eq!(input.text(), "skills");
        input.navigate_down();
        assert_eq!(input.text(), "pro");
        assert_eq!(input.history_index, None);
    }

    #[test]
    fn test_navigate_down_without_browsing_is_noop() {
        let mut input = typed("x");
        input.navigate_down();
        assert_eq!(input.text(), "x");
    }
}
