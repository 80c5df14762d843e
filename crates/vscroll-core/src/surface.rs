#![forbid(unsafe_code)]

//! Host surfaces: glyph measurement and the scrolled viewport.
//!
//! The engines and estimators are headless; everything host-specific
//! flows through these two traits. A DOM host measures glyphs with an
//! offscreen element and forwards setter calls to element styles; a
//! test host uses [`FixedGlyphMeasurer`] and an in-memory viewport.

use crate::geometry::RenderedRange;
use crate::style::TextStyle;

/// How a programmatic scroll reaches its target offset.
///
/// Forwarded untouched to [`Viewport::scroll_to_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Host-chosen behavior.
    #[default]
    Auto,
    /// Jump without animation.
    Instant,
    /// Animated scroll.
    Smooth,
}

/// Measures the pixel width of a single glyph in a given style.
///
/// One glyph is enough: layout estimation assumes a monospace grid, so
/// every character advances by the same amount. Implementations may be
/// expensive (the typical host renders a probe character offscreen and
/// measures its bounding box); callers are expected to memoize per
/// style.
pub trait GlyphMeasurer {
    /// Pixel width of one glyph rendered in `style`.
    fn glyph_width(&mut self, style: &TextStyle) -> f64;
}

impl<F> GlyphMeasurer for F
where
    F: FnMut(&TextStyle) -> f64,
{
    fn glyph_width(&mut self, style: &TextStyle) -> f64 {
        self(style)
    }
}

/// A measurer that reports the same width for every style.
///
/// Stands in for a real font probe in tests and headless hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGlyphMeasurer {
    width_px: f64,
}

impl FixedGlyphMeasurer {
    /// Create a measurer that always reports `width_px`.
    #[inline]
    #[must_use]
    pub const fn new(width_px: f64) -> Self {
        Self { width_px }
    }
}

impl GlyphMeasurer for FixedGlyphMeasurer {
    fn glyph_width(&mut self, _style: &TextStyle) -> f64 {
        self.width_px
    }
}

/// The rendering surface a range engine drives.
///
/// Getters report the host's current scroll state; setters publish the
/// engine's decisions back. Implementations should be cheap: every
/// scroll notification reads each getter at most a few times and writes
/// each setter at most once.
pub trait Viewport {
    /// Current scroll offset in surface coordinates, in pixels.
    fn scroll_offset(&self) -> f64;

    /// Visible extent along the scroll axis, in pixels.
    fn viewport_size(&self) -> f64;

    /// Number of items the host currently holds.
    fn data_length(&self) -> usize;

    /// Publish the total scrollable content size, in pixels.
    fn set_total_content_size(&mut self, size_px: f64);

    /// Publish the half-open range of items to materialize.
    fn set_rendered_range(&mut self, range: RenderedRange);

    /// Publish the pixel offset at which the rendered slice is placed.
    fn set_rendered_content_offset(&mut self, offset_px: f64);

    /// Ask the host to scroll to `offset_px`.
    fn scroll_to_offset(&mut self, offset_px: f64, behavior: ScrollBehavior);
}
