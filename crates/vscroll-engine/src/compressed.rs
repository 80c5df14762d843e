#![forbid(unsafe_code)]

//! Range engine for uniform-height items in a compressed coordinate
//! space.
//!
//! Hosts cap how large a scrollable element can be; a list of millions
//! of rows at a fixed height would exceed that cap. This engine keeps
//! the surface inside a fixed compressed extent and maintains the
//! mapping to the virtual coordinate space: offsets received from the
//! surface are decompressed before index math, offsets published back
//! are compressed. Item counts and indices are never converted.

use vscroll_core::{BufferConfig, ConfigError, RenderedRange, ScrollBehavior, Viewport};

use crate::engine::{IndexEmitter, RangeEngine};

/// Item height assumed when none is configured, in pixels.
pub const DEFAULT_ITEM_SIZE: f64 = 20.0;

/// Compressed total size published to the surface, in pixels.
///
/// Stays well below the ~16.7M px element size ceiling of common hosts.
pub const DEFAULT_MAX_SURFACE_PX: f64 = 10_000_000.0;

fn to_virtual_at(ratio: f64, compressed_pos: f64) -> f64 {
    compressed_pos * ratio
}

fn to_compressed_at(ratio: f64, virtual_pos: f64) -> f64 {
    if ratio <= 0.0 {
        return 0.0;
    }
    virtual_pos / ratio
}

/// Virtual scroll range engine for fixed-size items beyond the host's
/// addressable extent.
///
/// The surface is always told the content is `compressed_total_size`
/// pixels tall; the compression ratio (virtual size over compressed
/// size) is rebuilt from the surface's data length on attach, on data
/// length changes, and on every scroll notification. Intended for lists
/// whose virtual extent exceeds the surface maximum; with smaller lists
/// the ratio drops below 1 and offsets expand instead.
///
/// # Example
/// ```
/// use vscroll_core::BufferConfig;
/// use vscroll_engine::{CompressedRangeEngine, SimViewport};
///
/// // 1M rows at 20px is 20M virtual pixels, compressed 2:1.
/// let mut engine = CompressedRangeEngine::new(20.0, BufferConfig::default());
/// let emitted = engine.attach(SimViewport::new(400.0, 1_000_000));
///
/// assert_eq!(emitted, Some(0));
/// assert_eq!(engine.compression_ratio(), 2.0);
/// assert_eq!(engine.viewport().unwrap().total_content_size(), 10_000_000.0);
/// ```
#[derive(Debug)]
pub struct CompressedRangeEngine<V> {
    viewport: Option<V>,
    item_size: f64,
    buffer: BufferConfig,
    compressed_total_size: f64,
    virtual_total_size: f64,
    compression_ratio: f64,
    emitter: IndexEmitter,
    range: RenderedRange,
}

impl<V: Viewport> CompressedRangeEngine<V> {
    /// Create a detached engine for items of `item_size` pixels.
    #[must_use]
    pub fn new(item_size: f64, buffer: BufferConfig) -> Self {
        Self {
            viewport: None,
            item_size,
            buffer,
            compressed_total_size: DEFAULT_MAX_SURFACE_PX,
            virtual_total_size: 0.0,
            compression_ratio: 1.0,
            emitter: IndexEmitter::default(),
            range: RenderedRange::default(),
        }
    }

    /// Override the compressed extent published to the surface.
    ///
    /// Must be positive. Intended to be called before attaching.
    #[must_use]
    pub fn with_max_surface_px(mut self, max_surface_px: f64) -> Self {
        self.compressed_total_size = max_surface_px;
        self
    }

    /// Attach to a surface, rebuild the compression metrics from its
    /// data length, publish total content size, and compute the initial
    /// rendered range.
    pub fn attach(&mut self, viewport: V) -> Option<usize> {
        self.viewport = Some(viewport);
        self.refresh_metrics();
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

    /// Replace the item size and buffer configuration together.
    ///
    /// Fails fast when `max_px < min_px`, leaving the engine untouched.
    /// On success the compression metrics are rebuilt and the range
    /// recomputed.
    pub fn update_item_size_and_buffer(
        &mut self,
        item_size: f64,
        buffer: BufferConfig,
    ) -> Result<Option<usize>, ConfigError> {
        buffer.validate()?;
        self.item_size = item_size;
        self.buffer = buffer;
        self.refresh_metrics();
        self.publish_total();
        Ok(self.recompute())
    }

    /// The host scrolled; recompute the rendered range.
    pub fn on_scrolled(&mut self) -> Option<usize> {
        self.refresh_metrics();
        self.recompute()
    }

    /// The host's data length changed; rebuild the compression metrics,
    /// republish total content size, and recompute.
    pub fn on_data_length_changed(&mut self) -> Option<usize> {
        self.refresh_metrics();
        self.publish_total();
        self.recompute()
    }

    /// Ask the host to scroll so that `index` sits at the viewport
    /// start. Indices at or past the data length are ignored.
    pub fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) {
        let item_size = self.item_size;
        let ratio = self.compression_ratio;
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        if index >= viewport.data_length() {
            return;
        }
        let offset = to_compressed_at(ratio, index as f64 * item_size);
        viewport.scroll_to_offset(offset, behavior);
    }

    /// Convert a compressed (surface) position to virtual space.
    #[must_use]
    pub fn to_virtual(&self, compressed_pos: f64) -> f64 {
        to_virtual_at(self.compression_ratio, compressed_pos)
    }

    /// Convert a virtual position to compressed (surface) space.
    ///
    /// Falls back to 0 when the ratio is degenerate (no data).
    #[must_use]
    pub fn to_compressed(&self, virtual_pos: f64) -> f64 {
        to_compressed_at(self.compression_ratio, virtual_pos)
    }

    /// Virtual pixels per compressed pixel.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        self.compression_ratio
    }

    /// Data length times item size, in virtual pixels.
    #[must_use]
    pub fn virtual_total_size(&self) -> f64 {
        self.virtual_total_size
    }

    /// The fixed extent published to the surface, in pixels.
    #[must_use]
    pub fn compressed_total_size(&self) -> f64 {
        self.compressed_total_size
    }

    /// The configured item height, in pixels.
    #[must_use]
    pub fn item_size(&self) -> f64 {
        self.item_size
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

    fn refresh_metrics(&mut self) {
        let Some(viewport) = self.viewport.as_ref() else {
            return;
        };
        self.virtual_total_size = viewport.data_length() as f64 * self.item_size;
        self.compression_ratio = self.virtual_total_size / self.compressed_total_size;
    }

    fn publish_total(&mut self) {
        let total = self.compressed_total_size;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.set_total_content_size(total);
        }
    }

    fn recompute(&mut self) -> Option<usize> {
        let item_size = self.item_size;
        let buffer = self.buffer;
        let ratio = self.compression_ratio;
        let mut range = self.range;
        let Some(viewport) = self.viewport.as_mut() else {
            return None;
        };

        let viewport_size = viewport.viewport_size();
        let data_length = viewport.data_length();
        let mut virtual_offset = to_virtual_at(ratio, viewport.scroll_offset());
        let mut first_visible = if item_size > 0.0 {
            virtual_offset / item_size
        } else {
            0.0
        };

        // The previous range can reach past the end after a data shrink;
        // re-anchor the first visible index to the surviving data before
        // resolving buffers.
        if range.end > data_length {
            let max_visible = if item_size > 0.0 {
                (viewport_size / item_size).ceil()
            } else {
                0.0
            };
            let clamped = first_visible
                .min(data_length as f64 - max_visible)
                .max(0.0);
            if clamped != first_visible {
                first_visible = clamped;
                virtual_offset = first_visible * item_size;
                range.start = first_visible.floor() as usize;
            }
            range.end = ((range.start as f64 + max_visible) as usize).min(data_length);
        }

        let start_buffer_px = virtual_offset - range.start as f64 * item_size;
        if start_buffer_px < buffer.min_px && range.start != 0 {
            let expand_start = ((buffer.max_px - start_buffer_px) / item_size).ceil();
            range.start = (range.start as f64 - expand_start).max(0.0) as usize;
            range.end = (first_visible + (viewport_size + buffer.min_px) / item_size)
                .ceil()
                .min(data_length as f64) as usize;
        } else {
            let end_buffer_px = range.end as f64 * item_size - (virtual_offset + viewport_size);
            if end_buffer_px < buffer.min_px && range.end != data_length {
                let expand_end = ((buffer.max_px - end_buffer_px) / item_size).ceil();
                if expand_end > 0.0 {
                    range.end = ((range.end as f64 + expand_end) as usize).min(data_length);
                    range.start = (first_visible - buffer.min_px / item_size)
                        .floor()
                        .max(0.0) as usize;
                }
            }
        }

        let start = range.start.min(data_length);
        let end = range.end.min(data_length).max(start);
        let range = RenderedRange::new(start, end);
        let content_offset = to_compressed_at(ratio, start as f64 * item_size).round();

        viewport.set_rendered_range(range);
        viewport.set_rendered_content_offset(content_offset);
        tracing::trace!(
            start = range.start,
            end = range.end,
            first_visible = first_visible,
            "rendered range updated"
        );

        self.range = range;
        self.emitter.emit(first_visible.floor() as usize)
    }
}

impl<V: Viewport> Default for CompressedRangeEngine<V> {
    /// 20px items with the default pixel buffers.
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_SIZE, BufferConfig::default())
    }
}

impl<V: Viewport> RangeEngine<V> for CompressedRangeEngine<V> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimViewport;

    // 1M rows at 20px: 20M virtual pixels against a 10M surface, 2:1.
    fn huge_engine() -> CompressedRangeEngine<SimViewport> {
        let mut engine = CompressedRangeEngine::new(20.0, BufferConfig::default());
        engine.attach(SimViewport::new(400.0, 1_000_000));
        engine
    }

    // ─── attach and coordinate mapping ───

    #[test]
    fn attach_publishes_the_compressed_total() {
        let engine = huge_engine();

        assert_eq!(engine.compression_ratio(), 2.0);
        assert_eq!(engine.virtual_total_size(), 20_000_000.0);
        let viewport = engine.viewport().unwrap();
        assert_eq!(viewport.total_content_size(), 10_000_000.0);
        assert_eq!(viewport.rendered_range(), RenderedRange::new(0, 30));
        assert_eq!(viewport.rendered_content_offset(), 0.0);
    }

    #[test]
    fn conversions_round_trip() {
        let engine = huge_engine();
        assert_eq!(engine.to_virtual(123.0), 246.0);
        assert_eq!(engine.to_compressed(246.0), 123.0);
    }

    #[test]
    fn detached_engine_maps_identically() {
        let engine: CompressedRangeEngine<SimViewport> = CompressedRangeEngine::default();
        assert_eq!(engine.item_size(), DEFAULT_ITEM_SIZE);
        assert_eq!(engine.compression_ratio(), 1.0);
        assert_eq!(engine.to_virtual(5.0), 5.0);
        assert_eq!(engine.to_compressed(5.0), 5.0);
    }

    #[test]
    fn degenerate_ratio_compresses_to_zero() {
        let mut engine = CompressedRangeEngine::new(20.0, BufferConfig::default());
        engine.attach(SimViewport::new(400.0, 0));

        assert_eq!(engine.compression_ratio(), 0.0);
        assert_eq!(engine.to_compressed(100.0), 0.0);
    }

    #[test]
    fn custom_surface_cap_changes_the_ratio() {
        let mut engine = CompressedRangeEngine::new(20.0, BufferConfig::default())
            .with_max_surface_px(1_000_000.0);
        engine.attach(SimViewport::new(400.0, 1_000_000));

        assert_eq!(engine.compressed_total_size(), 1_000_000.0);
        assert_eq!(engine.compression_ratio(), 20.0);
        assert_eq!(engine.viewport().unwrap().total_content_size(), 1_000_000.0);
    }

    // ─── range computation ───

    #[test]
    fn scroll_down_expands_the_end_buffer() {
        let mut engine = huge_engine();
        engine.viewport_mut().unwrap().set_scroll_offset(5000.0);

        let emitted = engine.on_scrolled();

        // 5000 compressed is 10000 virtual: items 500..520 visible.
        assert_eq!(emitted, Some(500));
        let viewport = engine.viewport().unwrap();
        assert_eq!(viewport.rendered_range(), RenderedRange::new(495, 530));
        assert_eq!(viewport.rendered_content_offset(), 4950.0);
    }

    #[test]
    fn unchanged_scroll_is_idempotent_and_silent() {
        let mut engine = huge_engine();
        engine.viewport_mut().unwrap().set_scroll_offset(5000.0);
        engine.on_scrolled();
        let before = engine.viewport().unwrap().rendered_range();

        let emitted = engine.on_scrolled();

        assert_eq!(emitted, None);
        assert_eq!(engine.viewport().unwrap().rendered_range(), before);
    }

    #[test]
    fn scroll_up_expands_the_start_buffer() {
        let mut engine = huge_engine();
        engine.viewport_mut().unwrap().set_scroll_offset(5000.0);
        engine.on_scrolled();

        engine.viewport_mut().unwrap().set_scroll_offset(4960.0);
        let emitted = engine.on_scrolled();

        // Start gap dropped to 20px; pull the start back and re-derive
        // the end from the visible span.
        assert_eq!(emitted, Some(496));
        assert_eq!(
            engine.viewport().unwrap().rendered_range(),
            RenderedRange::new(486, 521)
        );
        assert_eq!(engine.viewport().unwrap().rendered_content_offset(), 4860.0);
    }

    #[test]
    fn data_shrink_keeps_the_range_inside_the_new_data() {
        let mut engine = huge_engine();
        engine.viewport_mut().unwrap().set_scroll_offset(5000.0);
        engine.on_scrolled();

        engine.viewport_mut().unwrap().set_data_length(100);
        let emitted = engine.on_data_length_changed();

        // 2000 virtual pixels against the same surface; the old offset
        // now lands at the top of the list.
        assert_eq!(emitted, Some(0));
        let viewport = engine.viewport().unwrap();
        assert_eq!(viewport.rendered_range(), RenderedRange::new(0, 26));
        assert_eq!(viewport.rendered_content_offset(), 0.0);
        assert!(viewport.rendered_range().end <= viewport.data_length());
    }

    #[test]
    fn data_shrink_at_the_bottom_realigns_to_the_new_end() {
        let mut engine = CompressedRangeEngine::new(20.0, BufferConfig::default());
        let mut viewport = SimViewport::new(400.0, 1_000_000);
        viewport.set_scroll_offset(9_999_600.0);
        assert_eq!(engine.attach(viewport), Some(999_960));
        assert_eq!(
            engine.viewport().unwrap().rendered_range(),
            RenderedRange::new(999_955, 999_990)
        );

        engine.viewport_mut().unwrap().set_data_length(1000);
        let emitted = engine.on_data_length_changed();

        assert_eq!(emitted, Some(980));
        let viewport = engine.viewport().unwrap();
        assert_eq!(viewport.rendered_range(), RenderedRange::new(970, 1000));
        assert_eq!(viewport.rendered_content_offset(), 9_700_000.0);
    }

    #[test]
    fn empty_data_ranges_nothing() {
        let mut engine = CompressedRangeEngine::new(20.0, BufferConfig::default());
        let emitted = engine.attach(SimViewport::new(400.0, 0));

        assert_eq!(emitted, Some(0));
        let viewport = engine.viewport().unwrap();
        assert_eq!(viewport.rendered_range(), RenderedRange::new(0, 0));
        assert_eq!(viewport.rendered_content_offset(), 0.0);
        assert_eq!(engine.on_scrolled(), None);
    }

    // ─── updates ───

    #[test]
    fn invalid_buffer_update_keeps_previous_state() {
        let mut engine = huge_engine();

        let result = engine.update_item_size_and_buffer(30.0, BufferConfig::new(300.0, 100.0));

        assert_eq!(
            result,
            Err(ConfigError::InvalidBuffer {
                min_px: 300.0,
                max_px: 100.0,
            })
        );
        assert_eq!(engine.item_size(), 20.0);
        assert_eq!(engine.buffer_config(), BufferConfig::default());
    }

    #[test]
    fn update_rebuilds_the_compression_metrics() {
        let mut engine = huge_engine();

        let result = engine.update_item_size_and_buffer(10.0, BufferConfig::new(50.0, 100.0));

        assert_eq!(result, Ok(None));
        assert_eq!(engine.item_size(), 10.0);
        // 1M rows at 10px matches the surface exactly.
        assert_eq!(engine.compression_ratio(), 1.0);
        assert_eq!(engine.buffer_config(), BufferConfig::new(50.0, 100.0));
    }

    // ─── navigation ───

    #[test]
    fn scroll_to_index_converts_to_surface_space() {
        let mut engine = huge_engine();

        engine.scroll_to_index(500, ScrollBehavior::Smooth);

        let viewport = engine.viewport().unwrap();
        assert_eq!(viewport.scroll_requests(), &[(5000.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn out_of_range_navigation_is_ignored() {
        let mut engine = huge_engine();

        engine.scroll_to_index(1_000_000, ScrollBehavior::Auto);

        assert!(engine.viewport().unwrap().scroll_requests().is_empty());
    }

    #[test]
    fn detached_operations_are_no_ops() {
        let mut engine: CompressedRangeEngine<SimViewport> = CompressedRangeEngine::default();

        assert!(!engine.is_attached());
        assert_eq!(engine.on_scrolled(), None);
        assert_eq!(engine.on_data_length_changed(), None);
        engine.scroll_to_index(3, ScrollBehavior::Auto);
    }

    #[test]
    fn reattach_reports_the_first_visible_index_again() {
        let mut engine = huge_engine();
        assert_eq!(engine.on_scrolled(), None);

        let viewport = engine.detach().unwrap();
        assert_eq!(engine.attach(viewport), Some(0));
    }
}
