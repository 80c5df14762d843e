#![forbid(unsafe_code)]

//! Virtual scroll range engines.
//!
//! Given live viewport state (scroll offset, viewport size, data
//! length), a range engine decides which contiguous slice of items the
//! host must materialize, at what content offset, and notifies
//! first-visible-index changes. Two engines share that contract:
//!
//! - [`VariableRangeEngine`] ranges over a cumulative height index
//!   built per item (see `vscroll-text`), using binary search to map
//!   offsets to indices.
//! - [`CompressedRangeEngine`] ranges over uniform item heights and
//!   compresses the virtual coordinate space so lists whose total
//!   extent exceeds the host surface's addressable maximum still
//!   scroll end to end.
//!
//! Both are synchronous and single-threaded; the host calls
//! [`RangeEngine::on_scrolled`] and friends from its event loop and
//! applies the published state. [`SimViewport`] is an in-memory host
//! for tests and headless use.

pub mod compressed;
mod engine;
pub mod search;
pub mod sim;
pub mod variable;

pub use compressed::{CompressedRangeEngine, DEFAULT_ITEM_SIZE, DEFAULT_MAX_SURFACE_PX};
pub use engine::RangeEngine;
pub use search::{first_cumulative_above, first_index_above};
pub use sim::SimViewport;
pub use variable::VariableRangeEngine;
