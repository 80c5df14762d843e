#![forbid(unsafe_code)]

//! Public facade for the virtualized text-list engines.
//!
//! This crate provides the stable, ergonomic surface area for hosts. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude; the module aliases at the bottom reach the full
//! member crate APIs.
//!
//! The pipeline in one sentence: a [`HeightIndexer`] turns texts into
//! cumulative [`HeightRecord`]s without rendering, a range engine
//! ([`VariableRangeEngine`] or [`CompressedRangeEngine`]) attached to a
//! [`Viewport`] turns scroll state into the slice of items the host
//! must materialize.

// --- Core re-exports --------------------------------------------------------

pub use vscroll_core::{
    BufferConfig, ConfigError, FixedGlyphMeasurer, GlyphMeasurer, HeightRecord, RenderedRange,
    RowMetrics, ScrollBehavior, TextStyle, Viewport,
};

// --- Measurement re-exports -------------------------------------------------

pub use vscroll_text::{
    CacheStats, CharWidthCache, DEFAULT_LINE_CACHE_CAPACITY, HeightIndexer, LineCountCache,
    LineWrapEstimator, wrapped_line_count,
};

// --- Engine re-exports ------------------------------------------------------

pub use vscroll_engine::{
    CompressedRangeEngine, DEFAULT_ITEM_SIZE, DEFAULT_MAX_SURFACE_PX, RangeEngine, SimViewport,
    VariableRangeEngine, first_cumulative_above, first_index_above,
};

// --- Errors -----------------------------------------------------------------

/// Standard result type for vscroll APIs.
pub type Result<T> = std::result::Result<T, ConfigError>;

// --- Prelude ----------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BufferConfig, CompressedRangeEngine, ConfigError, FixedGlyphMeasurer, GlyphMeasurer,
        HeightIndexer, HeightRecord, RangeEngine, RenderedRange, Result, RowMetrics,
        ScrollBehavior, SimViewport, TextStyle, VariableRangeEngine, Viewport,
    };

    pub use crate::{core, engine, text};
}

pub use vscroll_core as core;
pub use vscroll_engine as engine;
pub use vscroll_text as text;
