//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never mutate
//! state. [`layout_areas`] is shared with the reducer, so mouse hit testing and
//! drawing agree on where everything is.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};

use crate::features::header::render_header;
use crate::features::input::{input_cursor_position, render_input};
use crate::features::nav::render_nav;
use crate::features::output::render_output;
use crate::state::{AppState, TITLE};

/// Width reserved for the scrollbar on the right of the output.
const SCROLLBAR_WIDTH: u16 = 1;

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub nav: Rect,
    /// Text area of the output (scrollbar excluded).
    pub output: Rect,
    pub scrollbar: Rect,
    /// Separator line above the prompt.
    pub divider: Rect,
    pub input: Rect,
}

/// Splits the screen: header, navigation (when configured), output, prompt.
pub fn layout_areas(area: Rect, show_nav: bool) -> Areas {
    let nav_height = u16::from(show_nav);
    let [header, nav, body, divider, input] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(nav_height),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let [output, scrollbar] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(SCROLLBAR_WIDTH)]).areas(body);

    Areas {
        header,
        nav,
        output,
        scrollbar,
        divider,
        input,
    }
}

/// Renders the entire UI.
pub fn render(app: &AppState, frame: &mut Frame) {
    let areas = layout_areas(frame.area(), !app.nav.is_empty());

    render_header(frame, areas.header, TITLE, &app.clock);
    if !app.nav.is_empty() {
        render_nav(frame, areas.nav, &app.nav);
    }
    render_output(frame, &app.output, areas.scrollbar);

    frame.render_widget(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
        areas.divider,
    );

    let prompt = app.shell.prompt();
    render_input(frame, areas.input, prompt, &app.input);
    frame.set_cursor_position(input_cursor_position(areas.input, prompt, &app.input));
}
