//! Navigation bar layout and hit testing.

use std::ops::Range;

use folio_core::NavItem;
use unicode_width::UnicodeWidthStr;

use crate::common::sanitize_for_display;

/// Columns between entries.
const GAP: usize = 2;

/// One laid-out entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Text drawn for the entry, e.g. `1 About`.
    pub text: String,
    pub command: String,
    /// Display columns relative to the bar's left edge.
    pub columns: Range<usize>,
}

/// The laid-out navigation bar.
#[derive(Debug, Clone, Default)]
pub struct NavBar {
    entries: Vec<NavEntry>,
}

impl NavBar {
    /// Lays out `items` left to right. The first nine get a digit prefix
    /// matching their Alt+N shortcut.
    pub fn new(items: &[NavItem]) -> Self {
        let mut entries = Vec::with_capacity(items.len());
        let mut col = 0;
        for (idx, item) in items.iter().enumerate() {
            let label = sanitize_for_display(&item.label);
            let text = if idx < 9 {
                format!("{} {label}", idx + 1)
            } else {
                label.into_owned()
            };
            let width = text.width();
            entries.push(NavEntry {
                text,
                command: item.command.clone(),
                columns: col..col + width,
            });
            col += width + GAP;
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Command of the entry under `column` (relative to the bar's left edge).
    pub fn command_at(&self, column: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.columns.contains(&column))
            .map(|entry| entry.command.as_str())
    }

    /// Gap between entries, in columns.
    pub fn gap() -> usize {
        GAP
    }
}
