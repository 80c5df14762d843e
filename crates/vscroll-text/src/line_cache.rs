#![forbid(unsafe_code)]

//! LRU cache of wrapped line counts.
//!
//! Rebuilding a height index recomputes the wrap estimate for every
//! item, and large lists are dominated by repeated messages. Keyed by a
//! fingerprint of (text, container width, style), this cache turns
//! those repeats into lookups.
//!
//! # Example
//! ```
//! use vscroll_core::TextStyle;
//! use vscroll_text::LineCountCache;
//!
//! let mut cache = LineCountCache::new(100);
//! let style = TextStyle::monospace_13();
//!
//! let lines = cache.get_or_compute_with("hello", 70.0, &style, || 1);
//! assert_eq!(lines, 1);
//!
//! // Second call hits the cache; the closure is not run.
//! let lines = cache.get_or_compute_with("hello", 70.0, &style, || 99);
//! assert_eq!(lines, 1);
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use vscroll_core::TextStyle;

use crate::width_cache::CacheStats;

/// Default cache capacity.
pub const DEFAULT_LINE_CACHE_CAPACITY: usize = 4096;

/// LRU cache for wrapped line counts.
///
/// # Performance
/// - Uses FxHash for fast hashing
/// - O(1) lookup and insertion
/// - Automatic LRU eviction
/// - Keys are stored as 64-bit fingerprints (not full texts) to keep
///   memory proportional to the capacity, not the corpus
///
/// # Hash Collisions
/// The fingerprint conflates colliding (text, width, style) triples.
/// With FxHash the probability is ~1 in 2^64 per pair; a collision
/// yields a wrong line estimate for one entry, never a panic. Callers
/// needing certainty can bypass the cache.
///
/// # Thread Safety
/// `LineCountCache` is not thread-safe; the pipeline is single-threaded
/// by design.
#[derive(Debug)]
pub struct LineCountCache {
    cache: LruCache<u64, usize>,
    hits: u64,
    misses: u64,
}

impl LineCountCache {
    /// Create a new cache with the specified capacity.
    ///
    /// If capacity is zero, defaults to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity must be > 0");
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a new cache with the default capacity (4096 entries).
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_LINE_CACHE_CAPACITY)
    }

    /// Get the cached line count or compute and cache it.
    pub fn get_or_compute_with<F>(
        &mut self,
        text: &str,
        container_width_px: f64,
        style: &TextStyle,
        compute: F,
    ) -> usize
    where
        F: FnOnce() -> usize,
    {
        let key = layout_key(text, container_width_px, style);

        if let Some(&lines) = self.cache.get(&key) {
            self.hits += 1;
            return lines;
        }

        self.misses += 1;
        let lines = compute();
        self.cache.put(key, lines);
        lines
    }

    /// Check if a layout is in the cache.
    #[must_use]
    pub fn contains(&self, text: &str, container_width_px: f64, style: &TextStyle) -> bool {
        self.cache
            .contains(&layout_key(text, container_width_px, style))
    }

    /// Peek at a cached line count without updating LRU order.
    #[must_use]
    pub fn peek(&self, text: &str, container_width_px: f64, style: &TextStyle) -> Option<usize> {
        self.cache
            .peek(&layout_key(text, container_width_px, style))
            .copied()
    }

    /// Clear the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
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
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Get the current number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get the cache capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    /// Resize the cache capacity.
    ///
    /// If the new capacity is smaller than the current size,
    /// entries will be evicted (LRU order).
    pub fn resize(&mut self, new_capacity: usize) {
        let new_capacity = NonZeroUsize::new(new_capacity.max(1)).expect("capacity must be > 0");
        self.cache.resize(new_capacity);
    }
}

impl Default for LineCountCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Fingerprint a (text, width, style) layout query with FxHash.
#[inline]
fn layout_key(text: &str, container_width_px: f64, style: &TextStyle) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    container_width_px.to_bits().hash(&mut hasher);
    style.hash(&mut hasher);
    hasher.finish()
}
