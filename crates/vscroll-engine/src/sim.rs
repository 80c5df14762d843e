#![forbid(unsafe_code)]

//! In-memory rendering surface.
//!
//! Stands in for a real scrolled host in tests, benchmarks, and
//! headless pipelines: scroll state is plain settable fields, and
//! everything an engine publishes is recorded for inspection.

use vscroll_core::{RenderedRange, ScrollBehavior, Viewport};

/// A [`Viewport`] backed by plain fields.
///
/// `scroll_to_offset` requests are recorded and applied immediately, as
/// an instant scroll on a real host would be.
///
/// # Example
/// ```
/// use vscroll_core::{ScrollBehavior, Viewport};
/// use vscroll_engine::SimViewport;
///
/// let mut viewport = SimViewport::new(400.0, 100);
/// viewport.set_scroll_offset(250.0);
/// assert_eq!(viewport.scroll_offset(), 250.0);
///
/// viewport.scroll_to_offset(0.0, ScrollBehavior::Instant);
/// assert_eq!(viewport.scroll_offset(), 0.0);
/// assert_eq!(viewport.scroll_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimViewport {
    scroll_offset: f64,
    viewport_size: f64,
    data_length: usize,
    total_content_size: f64,
    rendered_range: RenderedRange,
    rendered_content_offset: f64,
    scroll_requests: Vec<(f64, ScrollBehavior)>,
}

impl SimViewport {
    /// Create a viewport of `viewport_size` pixels over `data_length`
    /// items, scrolled to the top.
    #[must_use]
    pub fn new(viewport_size: f64, data_length: usize) -> Self {
        Self {
            viewport_size,
            data_length,
            ..Self::default()
        }
    }

    /// Move the scroll position, as a user scroll would.
    pub fn set_scroll_offset(&mut self, offset_px: f64) {
        self.scroll_offset = offset_px;
    }

    /// Resize the visible extent.
    pub fn set_viewport_size(&mut self, size_px: f64) {
        self.viewport_size = size_px;
    }

    /// Change the number of items the host holds.
    pub fn set_data_length(&mut self, length: usize) {
        self.data_length = length;
    }

    /// Last total content size an engine published.
    #[must_use]
    pub fn total_content_size(&self) -> f64 {
        self.total_content_size
    }

    /// Last rendered range an engine published.
    #[must_use]
    pub fn rendered_range(&self) -> RenderedRange {
        self.rendered_range
    }

    /// Last rendered content offset an engine published.
    #[must_use]
    pub fn rendered_content_offset(&self) -> f64 {
        self.rendered_content_offset
    }

    /// Every `scroll_to_offset` request received, in order.
    #[must_use]
    pub fn scroll_requests(&self) -> &[(f64, ScrollBehavior)] {
        &self.scroll_requests
    }
}

impl Viewport for SimViewport {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    fn data_length(&self) -> usize {
        self.data_length
    }

    fn set_total_content_size(&mut self, size_px: f64) {
        self.total_content_size = size_px;
    }

    fn set_rendered_range(&mut self, range: RenderedRange) {
        self.rendered_range = range;
    }

    fn set_rendered_content_offset(&mut self, offset_px: f64) {
        self.rendered_content_offset = offset_px;
    }

    fn scroll_to_offset(&mut self, offset_px: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push((offset_px, behavior));
        self.scroll_offset = offset_px;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_published_state() {
        let mut viewport = SimViewport::new(300.0, 10);
        viewport.set_total_content_size(5000.0);
        viewport.set_rendered_range(RenderedRange::new(2, 7));
        viewport.set_rendered_content_offset(40.0);

        assert_eq!(viewport.total_content_size(), 5000.0);
        assert_eq!(viewport.rendered_range(), RenderedRange::new(2, 7));
        assert_eq!(viewport.rendered_content_offset(), 40.0);
    }

    #[test]
    fn scroll_requests_apply_instantly() {
        let mut viewport = SimViewport::new(300.0, 10);
        viewport.scroll_to_offset(120.0, ScrollBehavior::Smooth);
        viewport.scroll_to_offset(60.0, ScrollBehavior::Auto);

        assert_eq!(viewport.scroll_offset(), 60.0);
        assert_eq!(
            viewport.scroll_requests(),
            &[(120.0, ScrollBehavior::Smooth), (60.0, ScrollBehavior::Auto)]
        );
    }
}
