#![forbid(unsafe_code)]

//! Range engine for variable-height items.
//!
//! Operates on the cumulative height index built per item (one
//! [`HeightRecord`] each): binary search maps scroll offsets to item
//! indices, so a scroll notification costs O(log n) while the O(n)
//! index rebuild stays on the data/resize path.

use vscroll_core::{BufferConfig, ConfigError, HeightRecord, RenderedRange, ScrollBehavior, Viewport};

use crate::engine::{IndexEmitter, RangeEngine};
use crate::search::first_cumulative_above;

/// Index of the item whose span covers `offset`.
///
/// 0 for offsets at or before the content start and for an empty index;
/// the last item for offsets past the content end.
fn index_at(heights: &[HeightRecord], offset: f64) -> usize {
    if offset <= 0.0 {
        return 0;
    }
    first_cumulative_above(heights, offset).unwrap_or(0)
}

/// Virtual scroll range engine over per-item heights.
///
/// Holds the height index and a [`BufferConfig`]; while attached to a
/// [`Viewport`] it publishes total content size, the rendered range,
/// and the rendered content offset, and reports first-visible-index
/// changes from every recompute entry point.
///
/// # Example
/// ```
/// use vscroll_core::{BufferConfig, HeightRecord};
/// use vscroll_engine::{SimViewport, VariableRangeEngine};
///
/// let heights: Vec<HeightRecord> = (0..100)
///     .map(|i| HeightRecord::new(20.0, 20.0 * (i + 1) as f64))
///     .collect();
///
/// let mut engine = VariableRangeEngine::new(heights, BufferConfig::default());
/// let emitted = engine.attach(SimViewport::new(200.0, 100));
///
/// assert_eq!(emitted, Some(0));
/// let viewport = engine.viewport().unwrap();
/// assert_eq!(viewport.total_content_size(), 2000.0);
/// assert_eq!(viewport.rendered_range().start, 0);
/// ```
#[derive(Debug)]
pub struct VariableRangeEngine<V> {
    viewport: Option<V>,
    heights: Vec<HeightRecord>,
    buffer: BufferConfig,
    emitter: IndexEmitter,
    range: RenderedRange,
}

impl<V: Viewport> VariableRangeEngine<V> {
    /// Create a detached engine over `heights`.
    ///
    /// Construction is unchecked; the buffer invariant is enforced by
    /// the update operations.
    #[must_use]
    pub fn new(heights: Vec<HeightRecord>, buffer: BufferConfig) -> Self {
        Self {
            viewport: None,
            heights,
            buffer,
            emitter: IndexEmitter::default(),
            range: RenderedRange::default(),
        }
    }

    /// Attach to a surface, publish total content size, and compute the
    /// initial rendered range.
    pub fn attach(&mut self, viewport: V) -> Option<usize> {
        self.viewport = Some(viewport);
        self.publish_total();
        self.recompute()
    }

    /// Detach, returning the surface and discarding pending
    /// notification state.
    pub fn detach(&mut self) -> Option<V> {
        self.emitter.reset();
        self.viewport.take()
    }

    /// Whether a surface is currently attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    /// The attached surface, if any.
    #[must_use]
    pub fn viewport(&self) -> Option<&V> {
        self.viewport.as_ref()
    }

    /// Mutable access to the attached surface, if any.
    pub fn viewport_mut(&mut self) -> Option<&mut V> {
        self.viewport.as_mut()
    }

    /// Replace the height index, republish total content size, and
    /// recompute the rendered range.
    pub fn set_heights(&mut self, heights: Vec<HeightRecord>) -> Option<usize> {
        self.replace_heights(heights);
        self.publish_total();
        self.recompute()
    }

    /// Replace the buffer configuration and recompute.
    ///
    /// Fails fast when `max_px < min_px`; the previous configuration
    /// stays in effect.
    pub fn set_buffer_config(
        &mut self,
        buffer: BufferConfig,
    ) -> Result<Option<usize>, ConfigError> {
        buffer.validate()?;
        self.buffer = buffer;
        Ok(self.recompute())
    }

    /// Replace the height index and buffer configuration together.
    ///
    /// Validates the buffer before applying either part, so a rejected
    /// update leaves the engine untouched.
    pub fn update(
        &mut self,
        heights: Vec<HeightRecord>,
        buffer: BufferConfig,
    ) -> Result<Option<usize>, ConfigError> {
        buffer.validate()?;
        self.replace_heights(heights);
        self.buffer = buffer;
        self.publish_total();
        Ok(self.recompute())
    }

    /// The host scrolled; recompute the rendered range.
    pub fn on_scrolled(&mut self) -> Option<usize> {
        self.recompute()
    }

    /// The host's data length changed; republish total content size and
    /// recompute.
    pub fn on_data_length_changed(&mut self) -> Option<usize> {
        self.publish_total();
        self.recompute()
    }

    /// Ask the host to scroll so that `index` sits at the viewport
    /// start. Indices outside the height index are ignored.
    pub fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) {
        if index >= self.heights.len() {
            return;
        }
        let offset = if index > 0 {
            self.heights[index - 1].cumulative_height
        } else {
            0.0
        };
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.scroll_to_offset(offset, behavior);
        }
    }

    /// Total content size: the last record's cumulative height, or 0.
    #[must_use]
    pub fn total_content_size(&self) -> f64 {
        self.heights
            .last()
            .map_or(0.0, |record| record.cumulative_height)
    }

    /// The height index currently in effect.
    #[must_use]
    pub fn heights(&self) -> &[HeightRecord] {
        &self.heights
    }

    /// The buffer configuration currently in effect.
    #[must_use]
    pub fn buffer_config(&self) -> BufferConfig {
        self.buffer
    }

    /// The last computed rendered range.
    #[must_use]
    pub fn rendered_range(&self) -> RenderedRange {
        self.range
    }

    fn replace_heights(&mut self, heights: Vec<HeightRecord>) {
        tracing::debug!(items = heights.len(), "height records replaced");
        self.heights = heights;
    }

    fn publish_total(&mut self) {
        let total = self.total_content_size();
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.set_total_content_size(total);
        }
    }

    fn recompute(&mut self) -> Option<usize> {
        let buffer = self.buffer;
        let heights = &self.heights;
        let Some(viewport) = self.viewport.as_mut() else {
            return None;
        };

        if heights.is_empty() {
            viewport.set_total_content_size(0.0);
            viewport.set_rendered_range(RenderedRange::new(0, 0));
            viewport.set_rendered_content_offset(0.0);
            self.range = RenderedRange::new(0, 0);
            return None;
        }

        let scroll_offset = viewport.scroll_offset();
        let viewport_size = viewport.viewport_size();
        // The height index bounds how many items can be ranged, whatever
        // length the host reports.
        let data_length = viewport.data_length().min(heights.len());

        let first_visible = index_at(heights, scroll_offset);

        let last_scroll_position = scroll_offset + viewport_size;
        let mut last_visible = index_at(heights, last_scroll_position);
        // Include the item partially covered by the viewport tail.
        if last_visible + 1 < data_length
            && heights[last_visible].cumulative_height < last_scroll_position
        {
            last_visible += 1;
        }

        let mut start = first_visible;
        if first_visible > 0 {
            let first_item_offset = heights[first_visible - 1].cumulative_height;
            if scroll_offset - first_item_offset < buffer.min_px {
                let buffered_offset = (scroll_offset - buffer.max_px).max(0.0);
                start = index_at(heights, buffered_offset);
            }
        }

        let mut end_index = last_visible;
        if last_visible + 1 < data_length {
            let last_item_end = heights[last_visible].cumulative_height;
            if last_item_end - last_scroll_position < buffer.min_px {
                end_index = index_at(heights, last_scroll_position + buffer.max_px)
                    .min(data_length - 1);
            }
        }

        let start = start.min(data_length);
        let end = (end_index + 1).min(data_length).max(start);
        let range = RenderedRange::new(start, end);
        let content_offset = if start > 0 {
            heights[start - 1].cumulative_height
        } else {
            0.0
        };

        viewport.set_rendered_range(range);
        viewport.set_rendered_content_offset(content_offset);
        tracing::trace!(
            start = range.start,
            end = range.end,
            first_visible = first_visible,
            "rendered range updated"
        );

        self.range = range;
        self.emitter.emit(first_visible)
    }
}

impl<V: Viewport> RangeEngine<V> for VariableRangeEngine<V> {
    fn attach(&mut self, viewport: V) -> Option<usize> {
        Self::attach(self, viewport)
    }

    fn detach(&mut self) -> Option<V> {
        Self::detach(self)
    }

    fn is_attached(&self) -> bool {
        Self::is_attached(self)
    }

    fn on_scrolled(&mut self) -> Option<usize> {
        Self::on_scrolled(self)
    }

    fn on_data_length_changed(&mut self) -> Option<usize> {
        Self::on_data_length_changed(self)
    }

    fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) {
        Self::scroll_to_index(self, index, behavior)
    }
}
