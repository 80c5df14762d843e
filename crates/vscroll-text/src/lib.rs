#![forbid(unsafe_code)]

//! Text layout estimation for virtualized lists.
//!
//! Predicts, without rendering, how many wrapped lines a text item
//! occupies at a given container width and monospace style, and the
//! pixel height that follows from it. The prediction is a character
//! count model: one measured glyph width per style, greedy word
//! packing against `floor(container_width / glyph_width)` columns.
//!
//! The hot path is indexing hundreds of thousands of items on every
//! width or content change, so each layer memoizes: glyph widths per
//! style ([`CharWidthCache`]), wrapped line counts per (text, width,
//! style) ([`LineCountCache`]), and [`HeightIndexer`] ties them
//! together to produce the cumulative height records the scroll
//! engines consume.

pub mod height_index;
pub mod line_cache;
pub mod width_cache;
pub mod wrap;

pub use height_index::HeightIndexer;
pub use line_cache::{DEFAULT_LINE_CACHE_CAPACITY, LineCountCache};
pub use width_cache::{CacheStats, CharWidthCache};
pub use wrap::{LineWrapEstimator, wrapped_line_count};
