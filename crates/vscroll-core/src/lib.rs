#![forbid(unsafe_code)]

//! Core: shared vocabulary for virtualized text lists.
//!
//! Types that the measurement and engine crates exchange (styles, height
//! records, rendered ranges, buffer configuration) and the two traits
//! that connect an engine to a concrete host: a measurement surface
//! ([`GlyphMeasurer`]) and a rendering surface ([`Viewport`]).

pub mod error;
pub mod geometry;
pub mod style;
pub mod surface;

pub use error::ConfigError;
pub use geometry::{BufferConfig, HeightRecord, RenderedRange, RowMetrics};
pub use style::TextStyle;
pub use surface::{FixedGlyphMeasurer, GlyphMeasurer, ScrollBehavior, Viewport};
