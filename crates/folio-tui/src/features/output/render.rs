//! Output view rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::layout::{RunKind, VisualRow};
use super::state::OutputView;
use crate::common::Scrollbar;

fn run_style(kind: &RunKind) -> Style {
    match kind {
        RunKind::Text => Style::default(),
        RunKind::Prompt => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        RunKind::Command => Style::default().add_modifier(Modifier::BOLD),
        RunKind::Link { .. } => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    }
}

fn row_to_line(row: &VisualRow) -> Line<'_> {
    Line::from(
        row.runs
            .iter()
            .map(|run| Span::styled(run.text.as_str(), run_style(&run.kind)))
            .collect::<Vec<_>>(),
    )
}

/// Draws the visible rows into the view's text area and the scrollbar into
/// `scrollbar_area`.
pub fn render_output(frame: &mut Frame, view: &OutputView, scrollbar_area: Rect) {
    let lines: Vec<Line<'_>> = view.visible_rows().iter().map(row_to_line).collect();
    frame.render_widget(Paragraph::new(lines), view.area());

    frame.render_widget(
        Scrollbar::new(view.rows().len(), view.viewport_height(), view.offset()),
        scrollbar_area,
    );
}
