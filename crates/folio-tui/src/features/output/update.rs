//! Output reducer: scrolling and link clicks.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::state::OutputView;

/// Rows moved per mouse wheel notch.
pub const MOUSE_SCROLL_ROWS: usize = 3;

/// Scroll commands from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    PageUp,
    PageDown,
    Top,
    Bottom,
}

pub fn handle_scroll(view: &mut OutputView, command: ScrollCommand) {
    let viewport = view.viewport_height();
    match command {
        ScrollCommand::PageUp => view.scroll.page_up(viewport),
        ScrollCommand::PageDown => view.scroll.page_down(viewport),
        ScrollCommand::Top => view.scroll.scroll_to_top(),
        ScrollCommand::Bottom => view.scroll.scroll_to_bottom(),
    }
}

/// Handles a mouse event over the output. Returns the href of a clicked link.
pub fn handle_mouse(view: &mut OutputView, mouse: MouseEvent) -> Option<String> {
    let viewport = view.viewport_height();
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            view.scroll.scroll_up(MOUSE_SCROLL_ROWS, viewport);
            None
        }
        MouseEventKind::ScrollDown => {
            view.scroll.scroll_down(MOUSE_SCROLL_ROWS, viewport);
            None
        }
        MouseEventKind::Down(MouseButton::Left) => view
            .link_at(mouse.column, mouse.row)
            .map(str::to_string),
        _ => None,
    }
}
