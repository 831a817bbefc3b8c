#![forbid(unsafe_code)]

//! Page scroll position and progress.

/// Percentage of the scrollable distance covered, clamped to `0..=100`.
///
/// A page that fits in the viewport has nothing to scroll and reports 0.
pub fn scroll_progress(offset: usize, content_height: usize, viewport_height: usize) -> f64 {
    let scrollable = content_height.saturating_sub(viewport_height);
    if scrollable == 0 {
        return 0.0;
    }
    (offset as f64 / scrollable as f64 * 100.0).clamp(0.0, 100.0)
}

/// Scroll offset of a page inside a viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    content_height: usize,
    viewport_height: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update page and viewport sizes, re-clamping the offset.
    pub fn set_extent(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn progress(&self) -> f64 {
        scroll_progress(self.offset, self.content_height, self.viewport_height)
    }

    pub fn scroll_to(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.offset.saturating_add_signed(delta);
        self.scroll_to(target);
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.page_step() as isize);
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-(self.page_step() as isize));
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the least amount that makes `top..top + height` visible,
    /// preferring its top edge when it is taller than the viewport.
    pub fn reveal(&mut self, top: usize, height: usize) {
        let bottom = top + height;
        if top < self.offset || height > self.viewport_height {
            self.scroll_to(top);
        } else if bottom > self.offset + self.viewport_height {
            self.scroll_to(bottom - self.viewport_height);
        }
    }

    fn page_step(&self) -> usize {
        self.viewport_height.saturating_sub(1).max(1)
    }
}
