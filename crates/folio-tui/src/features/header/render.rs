//! Header rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::state::ClockState;
use crate::common::truncate_with_ellipsis;

/// Draws `title` on the left and the clock on the right.
pub fn render_header(frame: &mut Frame, area: Rect, title: &str, clock: &ClockState) {
    let clock_width = u16::try_from(clock.text().width()).unwrap_or(u16::MAX);
    let [title_area, clock_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(clock_width)]).areas(area);

    let title = truncate_with_ellipsis(title, usize::from(title_area.width));
    frame.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            clock.text(),
            Style::default().fg(Color::DarkGray),
        )),
        clock_area,
    );
}
