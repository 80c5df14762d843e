#![forbid(unsafe_code)]

//! Per-style glyph width cache.
//!
//! Measuring a glyph is the expensive step of layout estimation (the
//! typical host renders a probe character offscreen and reads its
//! bounding box). Widths only change when the style changes, so the
//! cache keeps one entry per distinct [`TextStyle`] for its whole
//! lifetime. There is no eviction: the entry count is bounded by the
//! number of styles the host ever measures, which is small.
//!
//! # Example
//! ```
//! use vscroll_core::{FixedGlyphMeasurer, TextStyle};
//! use vscroll_text::CharWidthCache;
//!
//! let mut cache = CharWidthCache::new();
//! let mut measurer = FixedGlyphMeasurer::new(7.0);
//! let style = TextStyle::monospace_13();
//!
//! // First call measures
//! assert_eq!(cache.width_of(&style, &mut measurer), 7.0);
//!
//! // Second call hits the cache
//! assert_eq!(cache.width_of(&style, &mut measurer), 7.0);
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use rustc_hash::FxHashMap;
use vscroll_core::{GlyphMeasurer, TextStyle};

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Capacity: the bound for an LRU cache, the allocated table size
    /// for an unbounded one.
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Glyph width memo keyed by [`TextStyle`].
///
/// Styles hash by their derived `Hash`/`Eq`, so equal styles share one
/// entry regardless of where they were constructed. The map uses FxHash
/// for fast lookups.
///
/// # Thread Safety
/// `CharWidthCache` is not thread-safe. The whole pipeline is
/// single-threaded by design; wrap in a mutex if a host needs sharing.
#[derive(Debug, Default)]
pub struct CharWidthCache {
    widths: FxHashMap<TextStyle, f64>,
    hits: u64,
    misses: u64,
}

impl CharWidthCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached width for `style`, measuring on first use.
    #[inline]
    pub fn width_of<M>(&mut self, style: &TextStyle, measurer: &mut M) -> f64
    where
        M: GlyphMeasurer + ?Sized,
    {
        self.width_of_with(style, |s| measurer.glyph_width(s))
    }

    /// Get the cached width for `style`, computing with a closure on
    /// first use.
    ///
    /// The closure form keeps the borrow local, which matters when the
    /// measurer lives next to the cache in one struct.
    pub fn width_of_with<F>(&mut self, style: &TextStyle, measure: F) -> f64
    where
        F: FnOnce(&TextStyle) -> f64,
    {
        if let Some(&width) = self.widths.get(style) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = measure(style);
        self.widths.insert(style.clone(), width);
        width
    }

    /// Pre-populate the cache with a known width.
    ///
    /// Useful when the host already measured a style elsewhere.
    pub fn insert(&mut self, style: TextStyle, width_px: f64) {
        self.widths.insert(style, width_px);
    }

    /// Get the cached width without measuring.
    #[must_use]
    pub fn get(&self, style: &TextStyle) -> Option<f64> {
        self.widths.get(style).copied()
    }

    /// Check if a style has been measured.
    #[must_use]
    pub fn contains(&self, style: &TextStyle) -> bool {
        self.widths.contains_key(style)
    }

    /// Drop every entry.
    ///
    /// Call when the host's font rendering changed under the same
    /// styles (e.g. a webfont finished loading).
    pub fn clear(&mut self) {
        self.widths.clear();
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.widths.len(),
            capacity: self.widths.capacity(),
        }
    }

    /// Get the current number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vscroll_core::FixedGlyphMeasurer;

    fn style(size: &str) -> TextStyle {
        TextStyle::new("monospace", size, "400")
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = CharWidthCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn measures_once_per_style() {
        let mut cache = CharWidthCache::new();
        let mut calls = 0usize;
        let mut measurer = |_: &TextStyle| {
            calls += 1;
            7.2
        };

        assert_eq!(cache.width_of(&style("13px"), &mut measurer), 7.2);
        assert_eq!(cache.width_of(&style("13px"), &mut measurer), 7.2);
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn distinct_styles_measure_separately() {
        let mut cache = CharWidthCache::new();
        let mut measurer = |s: &TextStyle| if s.font_size == "13px" { 7.0 } else { 8.5 };

        assert_eq!(cache.width_of(&style("13px"), &mut measurer), 7.0);
        assert_eq!(cache.width_of(&style("16px"), &mut measurer), 8.5);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn get_and_contains() {
        let mut cache = CharWidthCache::new();
        assert!(!cache.contains(&style("13px")));
        assert!(cache.get(&style("13px")).is_none());

        cache.width_of(&style("13px"), &mut FixedGlyphMeasurer::new(7.0));
        assert!(cache.contains(&style("13px")));
        assert_eq!(cache.get(&style("13px")), Some(7.0));
    }

    #[test]
    fn insert_preloads_without_a_miss() {
        let mut cache = CharWidthCache::new();
        cache.insert(style("13px"), 7.0);

        let stats = cache.stats();
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hits, 0);

        let mut measurer =
            |_: &TextStyle| -> f64 { unreachable!("preloaded style must not measure") };
        assert_eq!(cache.width_of(&style("13px"), &mut measurer), 7.0);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn clear_drops_entries() {
        let mut cache = CharWidthCache::new();
        cache.insert(style("13px"), 7.0);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&style("13px")));
    }

    #[test]
    fn reset_stats() {
        let mut cache = CharWidthCache::new();
        let mut measurer = FixedGlyphMeasurer::new(7.0);
        cache.width_of(&style("13px"), &mut measurer);
        cache.width_of(&style("13px"), &mut measurer);

        cache.reset_stats();
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn hit_rate() {
        let stats = CacheStats {
            hits: 75,
            misses: 25,
            size: 3,
            capacity: 8,
        };
        assert!((stats.hit_rate() - 0.75).abs() < 0.001);
    }

    #[test]
    fn hit_rate_no_requests() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn zero_width_is_cached_too() {
        let mut cache = CharWidthCache::new();
        let mut calls = 0usize;
        let mut measurer = |_: &TextStyle| {
            calls += 1;
            0.0
        };

        assert_eq!(cache.width_of(&style("0px"), &mut measurer), 0.0);
        assert_eq!(cache.width_of(&style("0px"), &mut measurer), 0.0);
        assert_eq!(calls, 1);
    }
}
