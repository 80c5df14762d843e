#![forbid(unsafe_code)]

//! List geometry: per-item heights, rendered ranges, buffer sizes.

use crate::error::ConfigError;

/// Height of one item plus the running total up to and including it.
///
/// For a sequence of records, `cumulative_height` of record `i` is the
/// sum of `height[0..=i]`, so an item's start offset is the previous
/// record's `cumulative_height` (0 for the first item). With positive
/// heights the cumulative values are strictly increasing, which is what
/// the position search relies on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeightRecord {
    /// Height of this item, in pixels.
    pub height: f64,
    /// Sum of all heights up to and including this item, in pixels.
    pub cumulative_height: f64,
}

impl HeightRecord {
    /// Create a record from its two parts.
    #[inline]
    #[must_use]
    pub const fn new(height: f64, cumulative_height: f64) -> Self {
        Self {
            height,
            cumulative_height,
        }
    }
}

/// A half-open range `[start, end)` of item indices to materialize.
///
/// Invariant: `start <= end <= data_length`. An empty range is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderedRange {
    /// First rendered index (inclusive).
    pub start: usize,
    /// One past the last rendered index (exclusive).
    pub end: usize,
}

impl RenderedRange {
    /// Create a range from its bounds.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of items in the range.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range holds no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if an index falls inside the range.
    #[inline]
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Fixed per-row pixel metrics applied on top of wrapped line counts.
///
/// Construction is builder-style; padding and border default to 0.
///
/// # Example
/// ```
/// use vscroll_core::RowMetrics;
///
/// let metrics = RowMetrics::new(18.0).vertical_padding(16.0).border_height(1.0);
/// assert_eq!(metrics.height_for_lines(2), 53.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// Height of a single wrapped line, in pixels.
    pub line_height: f64,
    /// Total vertical padding added once per item, in pixels.
    pub vertical_padding: f64,
    /// Total border height added once per item, in pixels.
    pub border_height: f64,
}

impl RowMetrics {
    /// Metrics with the given line height and no padding or border.
    #[inline]
    #[must_use]
    pub const fn new(line_height: f64) -> Self {
        Self {
            line_height,
            vertical_padding: 0.0,
            border_height: 0.0,
        }
    }

    /// Set the vertical padding added once per item.
    #[inline]
    #[must_use]
    pub const fn vertical_padding(mut self, px: f64) -> Self {
        self.vertical_padding = px;
        self
    }

    /// Set the border height added once per item.
    #[inline]
    #[must_use]
    pub const fn border_height(mut self, px: f64) -> Self {
        self.border_height = px;
        self
    }

    /// Pixel height of an item spanning `lines` wrapped lines.
    ///
    /// Padding and border are added once per item, not per line.
    #[inline]
    #[must_use]
    pub fn height_for_lines(&self, lines: usize) -> f64 {
        lines as f64 * self.line_height + self.vertical_padding + self.border_height
    }
}

/// Pixel buffers rendered beyond the visible viewport.
///
/// When the buffered content remaining in the scroll direction drops
/// below `min_px`, an engine extends the rendered range far enough to
/// restore roughly `max_px` of buffer. Invariant: `max_px >= min_px`,
/// enforced by engine update operations (construction is unchecked).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferConfig {
    /// Buffer floor, in pixels.
    pub min_px: f64,
    /// Buffer target when replenishing, in pixels.
    pub max_px: f64,
}

impl BufferConfig {
    /// Create a configuration from its bounds.
    #[inline]
    #[must_use]
    pub const fn new(min_px: f64, max_px: f64) -> Self {
        Self { min_px, max_px }
    }

    /// Check the `max_px >= min_px` invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_px < self.min_px {
            Err(ConfigError::InvalidBuffer {
                min_px: self.min_px,
                max_px: self.max_px,
            })
        } else {
            Ok(())
        }
    }
}

impl Default for BufferConfig {
    /// 100px floor, 200px replenish target.
    fn default() -> Self {
        Self::new(100.0, 200.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── HeightRecord ───

    #[test]
    fn height_record_new() {
        let record = HeightRecord::new(36.0, 90.0);
        assert_eq!(record.height, 36.0);
        assert_eq!(record.cumulative_height, 90.0);
    }

    // ─── RenderedRange ───

    #[test]
    fn range_len_and_contains() {
        let range = RenderedRange::new(3, 8);
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
        assert!(range.contains(3));
        assert!(range.contains(7));
        assert!(!range.contains(8));
        assert!(!range.contains(2));
    }

    #[test]
    fn empty_range() {
        let range = RenderedRange::new(4, 4);
        assert_eq!(range.len(), 0);
        assert!(range.is_empty());
        assert!(!range.contains(4));
    }

    #[test]
    fn default_range_is_empty() {
        assert!(RenderedRange::default().is_empty());
    }

    // ─── RowMetrics ───

    #[test]
    fn single_line_height() {
        let metrics = RowMetrics::new(20.0);
        assert_eq!(metrics.height_for_lines(1), 20.0);
    }

    #[test]
    fn padding_added_once() {
        let metrics = RowMetrics::new(20.0).vertical_padding(10.0);
        assert_eq!(metrics.height_for_lines(1), 30.0);
    }

    #[test]
    fn border_added_once() {
        let metrics = RowMetrics::new(20.0).vertical_padding(10.0).border_height(2.0);
        assert_eq!(metrics.height_for_lines(1), 32.0);
    }

    #[test]
    fn multi_line_scales_line_height_only() {
        let metrics = RowMetrics::new(20.0);
        assert_eq!(metrics.height_for_lines(3), 60.0);

        let padded = RowMetrics::new(20.0).vertical_padding(10.0).border_height(2.0);
        assert_eq!(padded.height_for_lines(3), 72.0);
    }

    // ─── BufferConfig ───

    #[test]
    fn default_buffers() {
        let cfg = BufferConfig::default();
        assert_eq!(cfg.min_px, 100.0);
        assert_eq!(cfg.max_px, 200.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn equal_buffers_are_valid() {
        assert!(BufferConfig::new(150.0, 150.0).validate().is_ok());
    }

    #[test]
    fn inverted_buffers_are_invalid() {
        let cfg = BufferConfig::new(200.0, 100.0);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidBuffer {
                min_px: 200.0,
                max_px: 100.0,
            })
        );
    }
}
