//! Output scrollbar.
//!
//! The thumb length is computed once from the content and viewport sizes, so
//! it does not change size while scrolling, and it touches the bottom of the
//! track exactly at the maximum offset.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

const THUMB: &str = "█";
const TRACK: &str = "│";

#[derive(Debug, Clone, Copy)]
pub struct Scrollbar {
    total_rows: usize,
    viewport: usize,
    offset: usize,
}

impl Scrollbar {
    pub fn new(total_rows: usize, viewport: usize, offset: usize) -> Self {
        Self {
            total_rows,
            viewport,
            offset,
        }
    }

    /// Only drawn when the content overflows.
    fn is_visible(&self) -> bool {
        self.total_rows > self.viewport
    }

    /// `(start, len)` of the thumb on a track of `track` cells.
    fn thumb(&self, track: usize) -> Option<(usize, usize)> {
        let max_offset = self.total_rows.saturating_sub(self.viewport);
        if track == 0 || max_offset == 0 {
            return None;
        }
        let len = (track * self.viewport.min(track))
            .div_ceil(self.total_rows.max(1))
            .clamp(1, track);
        let start = self.offset.min(max_offset) * (track - len) / max_offset;
        Some((start, len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_visible() {
            return;
        }
        let Some((start, len)) = self.thumb(usize::from(area.height)) else {
            return;
        };

        let x = area.x + area.width.saturating_sub(1);
        let style = Style::default().fg(Color::DarkGray);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let symbol = if (start..start + len).contains(&idx) {
                THUMB
            } else {
                TRACK
            };
            buf.set_string(x, y, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_content_fits() {
        assert!(!Scrollbar::new(10, 20, 0).is_visible());
        assert!(!Scrollbar::new(20, 20, 0).is_visible());
        assert!(Scrollbar::new(21, 20, 0).is_visible());
    }

    #[test]
    fn test_thumb_reaches_both_ends() {
        let bar = Scrollbar::new(100, 20, 0);
        let (start, len) = bar.thumb(20).unwrap();
        assert_eq!(start, 0);

        let bottom = Scrollbar::new(100, 20, 80);
        let (end_start, end_len) = bottom.thumb(20).unwrap();
        assert_eq!(len, end_len);
        assert_eq!(end_start + end_len, 20);
    }
}
