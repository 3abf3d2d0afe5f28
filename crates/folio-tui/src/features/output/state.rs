//! Output view state.
//!
//! Caches the wrapped rows of the output buffer and tracks the viewport. The
//! layout is rebuilt only when the buffer revision or the viewport width
//! changes.

use folio_core::OutputBuffer;
use ratatui::layout::Rect;

use super::layout::{VisualRow, layout_children};
use super::scroll::ScrollState;

#[derive(Debug, Default)]
pub struct OutputView {
    pub scroll: ScrollState,
    rows: Vec<VisualRow>,
    /// `(revision, width)` the rows were built for.
    laid_out: Option<(u64, u16)>,
    /// Last `scroll_requests` value acted upon.
    seen_scroll_requests: u64,
    /// Screen area of the text (scrollbar column excluded).
    area: Rect,
}

impl OutputView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[VisualRow] {
        &self.rows
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn viewport_height(&self) -> usize {
        usize::from(self.area.height)
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.scroll.offset(self.viewport_height())
    }

    pub fn visible_rows(&self) -> &[VisualRow] {
        let start = self.offset().min(self.rows.len());
        let end = (start + self.viewport_height()).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Brings the view up to date with `buffer` drawn into `area`.
    pub fn sync(&mut self, buffer: &OutputBuffer, area: Rect, margin: usize) {
        let key = (buffer.revision(), area.width);
        if self.laid_out != Some(key) {
            self.rows = layout_children(buffer.children(), usize::from(area.width), margin);
            self.laid_out = Some(key);
        }
        self.area = area;
        self.scroll.update_row_count(self.rows.len());

        if buffer.is_empty() {
            self.scroll.reset();
        }
        if buffer.scroll_requests() != self.seen_scroll_requests {
            self.seen_scroll_requests = buffer.scroll_requests();
            self.scroll.scroll_to_bottom();
        }
    }

    /// Link under the screen cell `(column, row)`.
    pub fn link_at(&self, column: u16, row: u16) -> Option<&str> {
        let area = self.area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let index = self.offset() + usize::from(row - area.y);
        self.rows
            .get(index)?
            .link_at(usize::from(column - area.x))
    }
}

#[cfg(test)]
mod tests {
    use folio_core::{NewLine, Region, RenderTarget};

    use super::*;

    fn buffer_with_lines(count: usize) -> OutputBuffer {
        let mut buffer = OutputBuffer::new();
        let block = buffer.open_block();
        for i in 0..count {
            let line = buffer.push_line(block, NewLine::Text { bullet: false }).unwrap();
            for ch in format!("line {i}").chars() {
                buffer.write(line.region(Region::Body), ch);
            }
        }
        buffer
    }

    #[test]
    fn test_sync_follows_latest() {
        let buffer = buffer_with_lines(30);
        let mut view = OutputView::new();
        view.sync(&buffer, Rect::new(0, 2, 40, 10), 0);

        assert_eq!(view.rows().len(), 30);
        assert_eq!(view.offset(), 20);
        assert_eq!(view.visible_rows()[0].text(), "line 20");
    }

    #[test]
    fn test_scroll_request_returns_to_bottom() {
        let mut buffer = buffer_with_lines(30);
        let mut view = OutputView::new();
        let area = Rect::new(0, 0, 40, 10);
        view.sync(&buffer, area, 0);
        view.scroll.scroll_to_top();
        view.sync(&buffer, area, 0);
        assert_eq!(view.offset(), 0);

        buffer.scroll_to_bottom();
        view.sync(&buffer, area, 0);
        assert!(view.scroll.is_following());
    }

    #[test]
    fn test_link_at_maps_screen_cells() {
        let mut buffer = OutputBuffer::new();
        let block = buffer.open_block();
        let line = buffer
            .push_line(
                block,
                NewLine::Linked {
                    url: "https://example.com",
                    has_after: false,
                    bullet: false,
                },
            )
            .unwrap();
        for ch in "https://example.com".chars() {
            buffer.write(line.region(Region::Link), ch);
        }

        let mut view = OutputView::new();
        view.sync(&buffer, Rect::new(2, 5, 40, 10), 0);
        assert_eq!(view.link_at(2, 5), Some("https://example.com"));
        assert_eq!(view.link_at(1, 5), None);
        assert_eq!(view.link_at(2, 6), None);
    }

    #[test]
    fn test_clear_resets_scroll() {
        let mut buffer = buffer_with_lines(30);
        let mut view = OutputView::new();
        let area = Rect::new(0, 0, 40, 10);
        view.sync(&buffer, area, 0);
        view.scroll.scroll_up(5, 10);

        buffer.clear();
        view.sync(&buffer, area, 0);
        assert!(view.rows().is_empty());
        assert!(view.scroll.is_following());
    }
}
