#![forbid(unsafe_code)]

//! Font style keys for glyph measurement.

/// An opaque font description forwarded to the measurement surface.
///
/// The layout estimator never interprets these fields; it only requires
/// that equal styles measure to equal glyph widths. The derived
/// `Hash`/`Eq` are the canonical memoization key used by the width
/// caches.
///
/// # Example
/// ```
/// use vscroll_core::TextStyle;
///
/// let a = TextStyle::new("monospace", "13px", "400");
/// let b = TextStyle::new("monospace", "13px", "400");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Font family list, in the host's notation (e.g. a CSS family stack).
    pub font_family: String,
    /// Font size including its unit (e.g. `13px`).
    pub font_size: String,
    /// Font weight (e.g. `400`).
    pub font_weight: String,
}

impl TextStyle {
    /// Create a style key from its three parts.
    #[must_use]
    pub fn new(
        font_family: impl Into<String>,
        font_size: impl Into<String>,
        font_weight: impl Into<String>,
    ) -> Self {
        Self {
            font_family: font_family.into(),
            font_size: font_size.into(),
            font_weight: font_weight.into(),
        }
    }

    /// The 13px monospace stack used by log-style lists.
    #[must_use]
    pub fn monospace_13() -> Self {
        Self::new("Monaco, Consolas, \"Courier New\", monospace", "13px", "400")
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::monospace_13()
    }
}
