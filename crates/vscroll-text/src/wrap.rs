#![forbid(unsafe_code)]

//! Greedy line wrap estimation for monospace text.
//!
//! Mirrors how a `white-space: pre-wrap` host breaks monospace text:
//! explicit `'\n'` always breaks; within a segment, words pack greedily
//! into `floor(container_width / glyph_width)` columns, with a long
//! word splitting across as many full lines as it needs.
//!
//! The estimate is a character count model, not a shaping pass. It is
//! exact for the monospace grid it assumes, which is what makes item
//! heights computable for a million rows without touching a renderer.
//!
//! # Example
//! ```
//! use vscroll_text::wrapped_line_count;
//!
//! // 10 columns at 7px per glyph: "hello world" breaks after "hello".
//! assert_eq!(wrapped_line_count("hello world", 70.0, 7.0), 2);
//!
//! // Explicit breaks always count, even when the segment is empty.
//! assert_eq!(wrapped_line_count("a\n\nb", 70.0, 7.0), 3);
//! ```

use vscroll_core::{GlyphMeasurer, RowMetrics, TextStyle};

use crate::width_cache::{CacheStats, CharWidthCache};

/// Number of wrapped lines `text` occupies at `container_width_px`,
/// given a measured glyph width.
///
/// Segments between `'\n'` wrap independently; an empty segment still
/// occupies one blank line. Words are runs between single `' '`
/// characters, counted in `char`s, and each word after the first on a
/// line costs one extra column for its separator. A word wider than the
/// whole line splits across `ceil(len / columns)` lines and leaves its
/// tail chunk open for following words.
///
/// Consecutive spaces split into zero-length words that still consume
/// their separator column each, so runs of spaces advance the line the
/// way a `pre` host renders them. Degenerate input (container width or
/// glyph width at or below zero) estimates as a single line instead of
/// erroring.
#[must_use]
pub fn wrapped_line_count(text: &str, container_width_px: f64, char_width_px: f64) -> usize {
    if char_width_px <= 0.0 {
        return 1;
    }
    let max_chars = (container_width_px / char_width_px).floor();
    if max_chars < 1.0 || max_chars.is_nan() {
        return 1;
    }
    let max_chars = max_chars as usize;

    let mut total_lines = 0usize;
    for segment in text.split('\n') {
        if segment.is_empty() {
            total_lines += 1;
            continue;
        }

        let mut line_count = 1usize;
        let mut current_len = 0usize;
        for (i, word) in segment.split(' ').enumerate() {
            let word_len = word.chars().count();
            let separator = usize::from(i != 0);

            if word_len > max_chars {
                // Close the open line before splitting the long word.
                if current_len > 0 {
                    line_count += 1;
                    current_len = 0;
                }
                line_count += word_len.div_ceil(max_chars) - 1;
                let tail = word_len % max_chars;
                current_len = if tail == 0 { max_chars } else { tail };
            } else if current_len + separator + word_len > max_chars {
                line_count += 1;
                current_len = word_len;
            } else {
                current_len += separator + word_len;
            }
        }

        total_lines += line_count;
    }

    total_lines
}

/// Line and height estimation bound to a measurement surface.
///
/// Owns the [`GlyphMeasurer`] and a [`CharWidthCache`], so repeated
/// estimates for the same style measure exactly once.
///
/// # Example
/// ```
/// use vscroll_core::{FixedGlyphMeasurer, RowMetrics, TextStyle};
/// use vscroll_text::LineWrapEstimator;
///
/// let mut estimator = LineWrapEstimator::new(FixedGlyphMeasurer::new(7.0));
/// let style = TextStyle::monospace_13();
///
/// assert_eq!(estimator.line_count("Hello", 7000.0, &style), 1);
/// assert_eq!(
///     estimator.item_height("Hello", 7000.0, &style, RowMetrics::new(20.0)),
///     20.0,
/// );
/// ```
#[derive(Debug)]
pub struct LineWrapEstimator<M> {
    measurer: M,
    widths: CharWidthCache,
}

impl<M: GlyphMeasurer> LineWrapEstimator<M> {
    /// Create an estimator over a measurement surface.
    #[must_use]
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            widths: CharWidthCache::new(),
        }
    }

    /// Cached glyph width for `style`, measuring on first use.
    pub fn char_width(&mut self, style: &TextStyle) -> f64 {
        let Self { measurer, widths } = self;
        widths.width_of_with(style, |s| measurer.glyph_width(s))
    }

    /// Number of wrapped lines `text` occupies at `container_width_px`.
    pub fn line_count(&mut self, text: &str, container_width_px: f64, style: &TextStyle) -> usize {
        let char_width = self.char_width(style);
        wrapped_line_count(text, container_width_px, char_width)
    }

    /// Pixel height of the item holding `text`, per `metrics`.
    pub fn item_height(
        &mut self,
        text: &str,
        container_width_px: f64,
        style: &TextStyle,
        metrics: RowMetrics,
    ) -> f64 {
        let lines = self.line_count(text, container_width_px, style);
        metrics.height_for_lines(lines)
    }

    /// Statistics of the underlying width cache.
    #[must_use]
    pub fn width_stats(&self) -> CacheStats {
        self.widths.stats()
    }

    /// Drop cached widths, forcing fresh measurement.
    ///
    /// Call when the host's font rendering changed under the same
    /// styles (e.g. a webfont finished loading).
    pub fn invalidate_widths(&mut self) {
        self.widths.clear();
    }
}
