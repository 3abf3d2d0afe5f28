//! Output scroll position.

/// How the output viewport is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Pinned to the newest output.
    FollowLatest,
    /// Scrolled by the user; `offset` is the first visible row.
    Anchored { offset: usize },
}

/// Scroll mode plus the row count of the last layout.
#[derive(Debug, Clone)]
pub struct ScrollState {
    pub mode: ScrollMode,
    pub row_count: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            mode: ScrollMode::FollowLatest,
            row_count: 0,
        }
    }
}

impl ScrollState {
    pub fn is_following(&self) -> bool {
        matches!(self.mode, ScrollMode::FollowLatest)
    }

    fn max_offset(&self, viewport: usize) -> usize {
        self.row_count.saturating_sub(viewport)
    }

    /// First visible row for a viewport of `viewport` rows.
    pub fn offset(&self, viewport: usize) -> usize {
        match self.mode {
            ScrollMode::FollowLatest => self.max_offset(viewport),
            ScrollMode::Anchored { offset } => offset.min(self.max_offset(viewport)),
        }
    }

    pub fn scroll_up(&mut self, rows: usize, viewport: usize) {
        let offset = self.offset(viewport).saturating_sub(rows);
        self.mode = ScrollMode::Anchored { offset };
    }

    /// Scrolls down; reaching the bottom resumes following.
    pub fn scroll_down(&mut self, rows: usize, viewport: usize) {
        if self.is_following() {
            return;
        }
        let max = self.max_offset(viewport);
        let offset = (self.offset(viewport) + rows).min(max);
        self.mode = if offset >= max {
            ScrollMode::FollowLatest
        } else {
            ScrollMode::Anchored { offset }
        };
    }

    pub fn page_up(&mut self, viewport: usize) {
        self.scroll_up(viewport.max(1), viewport);
    }

    pub fn page_down(&mut self, viewport: usize) {
        self.scroll_down(viewport.max(1), viewport);
    }

    pub fn scroll_to_top(&mut self) {
        self.mode = ScrollMode::Anchored { offset: 0 };
    }

    pub fn scroll_to_bottom(&mut self) {
        self.mode = ScrollMode::FollowLatest;
    }

    pub fn update_row_count(&mut self, rows: usize) {
        self.row_count = rows;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rows(rows: usize) -> ScrollState {
        let mut scroll = ScrollState::default();
        scroll.update_row_count(rows);
        scroll
    }

    #[test]
    fn test_follow_latest_shows_bottom() {
        let scroll = with_rows(50);
        assert_eq!(scroll.offset(10), 40);
        assert_eq!(with_rows(5).offset(10), 0);
    }

    #[test]
    fn test_scroll_up_anchors() {
        let mut scroll = with_rows(50);
        scroll.scroll_up(3, 10);
        assert_eq!(scroll.mode, ScrollMode::Anchored { offset: 37 });
        // New rows do not move an anchored view.
        scroll.update_row_count(60);
        assert_eq!(scroll.offset(10), 37);
    }

    #[test]
    fn test_scroll_down_to_bottom_resumes_following() {
        let mut scroll = with_rows(50);
        scroll.page_up(10);
        assert_eq!(scroll.offset(10), 30);
        scroll.page_down(10);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_top_and_reset() {
        let mut scroll = with_rows(50);
        scroll.scroll_to_top();
        assert_eq!(scroll.offset(10), 0);
        scroll.reset();
        assert!(scroll.is_following());
        assert_eq!(scroll.row_count, 0);
    }
}
