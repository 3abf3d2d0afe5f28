//! Input view.
//!
//! Draws `<prompt> <text>` on one row. When the text is wider than the row,
//! the view scrolls horizontally so the cursor stays visible.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::state::InputState;

fn prompt_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

/// Visible slice of the input plus the cursor column inside the row.
struct Viewport {
    visible: String,
    cursor_col: usize,
}

/// Fits `text` into `width` columns around the char-indexed `cursor`.
fn viewport(text: &str, cursor: usize, width: usize) -> Viewport {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let col_of = |idx: usize| -> usize { chars[..idx].iter().map(|c| c.width().unwrap_or(0)).sum() };

    // Leave room for the cursor cell itself.
    let budget = width.saturating_sub(1);
    let mut start = 0;
    while start < cursor && col_of(cursor) - col_of(start) > budget {
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        visible.push(*ch);
    }

    Viewport {
        visible,
        cursor_col: col_of(cursor) - col_of(start),
    }
}

fn prompt_prefix(prompt: &str) -> String {
    format!("{prompt} ")
}

/// Renders the prompt row.
pub fn render_input(frame: &mut Frame, area: Rect, prompt: &str, input: &InputState) {
    let prefix = prompt_prefix(prompt);
    let text_width = usize::from(area.width).saturating_sub(prefix.width());
    let view = viewport(input.text(), input.buffer.cursor(), text_width);

    let line = Line::from(vec![
        Span::styled(prefix, prompt_style()),
        Span::raw(view.visible),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Where the terminal cursor goes for the prompt row.
pub fn input_cursor_position(area: Rect, prompt: &str, input: &InputState) -> Position {
    let prefix_width = prompt_prefix(prompt).width();
    let text_width = usize::from(area.width).saturating_sub(prefix_width);
    let view = viewport(input.text(), input.buffer.cursor(), text_width);
    let col = (prefix_width + view.cursor_col).min(usize::from(area.width.saturating_sub(1)));
    Position::new(
        area.x + u16::try_from(col).unwrap_or(u16::MAX),
        area.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_fits_without_scrolling() {
        let view = viewport("about", 5, 20);
        assert_eq!(view.visible, "about");
        assert_eq!(view.cursor_col, 5);
    }

    #[test]
    fn test_viewport_scrolls_to_keep_cursor_visible() {
        let view = viewport("abcdefghij", 10, 5);
        assert_eq!(view.visible, "ghij");
        assert_eq!(view.cursor_col, 4);
    }

    #[test]
    fn test_viewport_counts_wide_chars() {
        let view = viewport("日本語", 3, 10);
        assert_eq!(view.cursor_col, 6);
    }

    #[test]
    fn test_cursor_position_after_prompt() {
        let mut input = InputState::new();
        input.buffer.insert_str("help");
        let area = Rect::new(0, 10, 40, 1);
        assert_eq!(input_cursor_position(area, "$", &input), Position::new(6, 10));
    }
}
