//! Navigation bar rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::NavBar;

pub fn render_nav(frame: &mut Frame, area: Rect, nav: &NavBar) {
    let gap = " ".repeat(NavBar::gap());
    let label_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::UNDERLINED);

    let mut spans = Vec::with_capacity(nav.entries().len() * 2);
    for (idx, entry) in nav.entries().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(gap.clone()));
        }
        spans.push(Span::styled(entry.text.as_str(), label_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
