#![forbid(unsafe_code)]

//! Height index construction.
//!
//! A height index is the `Vec<HeightRecord>` the variable-size scroll
//! engine consumes: one record per item, each carrying the item height
//! and the running total. The whole index is rebuilt whenever item
//! count, item content, container width, or style changes; single-item
//! patches are not supported, matching how the engines consume it.

use std::time::Instant;

use vscroll_core::{GlyphMeasurer, HeightRecord, RowMetrics, TextStyle};

use crate::line_cache::LineCountCache;
use crate::width_cache::CacheStats;
use crate::wrap::LineWrapEstimator;

/// Builds height records for a list of text items.
///
/// Wrap estimates flow through a [`LineCountCache`], so corpora
/// dominated by repeated messages pay for each distinct layout once
/// per rebuild generation.
///
/// # Example
/// ```
/// use vscroll_core::{FixedGlyphMeasurer, RowMetrics, TextStyle};
/// use vscroll_text::HeightIndexer;
///
/// let mut indexer = HeightIndexer::new(FixedGlyphMeasurer::new(7.0));
/// let items = vec!["one line".to_string(), "two\nlines".to_string()];
///
/// let records = indexer.build(
///     &items,
///     |item: &String| item.as_str(),
///     700.0,
///     &TextStyle::monospace_13(),
///     RowMetrics::new(20.0),
/// );
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].height, 20.0);
/// assert_eq!(records[1].height, 40.0);
/// assert_eq!(records[1].cumulative_height, 60.0);
/// ```
#[derive(Debug)]
pub struct HeightIndexer<M> {
    estimator: LineWrapEstimator<M>,
    lines: LineCountCache,
}

impl<M: GlyphMeasurer> HeightIndexer<M> {
    /// Create an indexer with the default line cache capacity.
    #[must_use]
    pub fn new(measurer: M) -> Self {
        Self {
            estimator: LineWrapEstimator::new(measurer),
            lines: LineCountCache::with_default_capacity(),
        }
    }

    /// Create an indexer with an explicit line cache capacity.
    #[must_use]
    pub fn with_line_cache_capacity(measurer: M, capacity: usize) -> Self {
        Self {
            estimator: LineWrapEstimator::new(measurer),
            lines: LineCountCache::new(capacity),
        }
    }

    /// Build the height record sequence for `items`.
    ///
    /// `text_of` selects the measured text from an item. Records come
    /// back in item order with strictly accumulating totals; an empty
    /// slice produces an empty vector. Same inputs, same output.
    pub fn build<T, F>(
        &mut self,
        items: &[T],
        text_of: F,
        container_width_px: f64,
        style: &TextStyle,
        metrics: RowMetrics,
    ) -> Vec<HeightRecord>
    where
        F: Fn(&T) -> &str,
    {
        let started = Instant::now();

        let Self { estimator, lines } = self;
        let mut records = Vec::with_capacity(items.len());
        let mut cumulative = 0.0f64;

        for item in items {
            let text = text_of(item);
            let count = lines.get_or_compute_with(text, container_width_px, style, || {
                estimator.line_count(text, container_width_px, style)
            });
            let height = metrics.height_for_lines(count);
            cumulative += height;
            records.push(HeightRecord::new(height, cumulative));
        }

        tracing::debug!(
            items = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "height index rebuilt"
        );

        records
    }

    /// Cached line count for a single item.
    pub fn line_count(&mut self, text: &str, container_width_px: f64, style: &TextStyle) -> usize {
        let Self { estimator, lines } = self;
        lines.get_or_compute_with(text, container_width_px, style, || {
            estimator.line_count(text, container_width_px, style)
        })
    }

    /// Cached pixel height for a single item.
    pub fn item_height(
        &mut self,
        text: &str,
        container_width_px: f64,
        style: &TextStyle,
        metrics: RowMetrics,
    ) -> f64 {
        metrics.height_for_lines(self.line_count(text, container_width_px, style))
    }

    /// Statistics of the line count cache.
    #[must_use]
    pub fn line_stats(&self) -> CacheStats {
        self.lines.stats()
    }

    /// Statistics of the glyph width cache.
    #[must_use]
    pub fn width_stats(&self) -> CacheStats {
        self.estimator.width_stats()
    }

    /// Drop all cached widths and line counts.
    ///
    /// Call when the host's font rendering changed under the same
    /// styles (e.g. a webfont finished loading).
    pub fn invalidate(&mut self) {
        self.estimator.invalidate_widths();
        self.lines.clear();
    }
}
