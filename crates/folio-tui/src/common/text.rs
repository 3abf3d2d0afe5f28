//! Text utilities for TUI rendering.
//!
//! Shared text processing functions used across rendering paths.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width a tab expands to.
const TAB_WIDTH: usize = 4;

/// Truncates a string with an ellipsis if it exceeds `max_width` columns.
///
/// Uses unicode width, so wide characters (CJK, emoji) are measured correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let next_width = width + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        width = next_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Makes typed output safe to draw: tabs become spaces and every other
/// control character (escape sequences included) is dropped.
///
/// Borrowed when nothing needs to change.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Flattens pasted text into one logical input line: line breaks and tabs
/// become single spaces, other control characters are dropped.
pub fn sanitize_single_line(s: &str) -> String {
    let flattened: String = s
        .chars()
        .filter_map(|ch| match ch {
            '\r' => None,
            '\n' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    flattened.trim_end().to_string()
}
