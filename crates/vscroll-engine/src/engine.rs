#![forbid(unsafe_code)]

//! The capability both range engines implement.

use vscroll_core::{ScrollBehavior, Viewport};

/// A virtual scroll range engine attached to at most one [`Viewport`].
///
/// Engines are state machines with two states: detached (no surface,
/// every operation is a no-op) and attached. The recompute entry points
/// (`attach`, `on_scrolled`, `on_data_length_changed`) return the
/// first-visible-index change notification: `Some(index)` when the
/// first visible item differs from the previously reported one, `None`
/// otherwise. Detaching discards the notification state, so an engine
/// re-attached to a surface reports the first visible index again.
///
/// Callers must apply data mutations before the scroll notifications
/// that depend on them: replace heights or signal a data length change
/// first, then forward `on_scrolled`.
pub trait RangeEngine<V: Viewport> {
    /// Attach to a surface, publish total content size, and compute the
    /// initial rendered range. Replaces any previously attached surface.
    fn attach(&mut self, viewport: V) -> Option<usize>;

    /// Detach, returning the surface. Pending notification state is
    /// discarded.
    fn detach(&mut self) -> Option<V>;

    /// Whether a surface is currently attached.
    fn is_attached(&self) -> bool;

    /// The host scrolled; recompute the rendered range.
    fn on_scrolled(&mut self) -> Option<usize>;

    /// The host's data length changed; republish total content size and
    /// recompute the rendered range.
    fn on_data_length_changed(&mut self) -> Option<usize>;

    /// Ask the host to scroll so that `index` sits at the viewport
    /// start. Out-of-range indices are ignored.
    fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior);
}

/// Duplicate suppression for first-visible-index notifications.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct IndexEmitter {
    last: Option<usize>,
}

impl IndexEmitter {
    /// Report `index`, returning it only when it differs from the last
    /// reported value.
    pub(crate) fn emit(&mut self, index: usize) -> Option<usize> {
        if self.last == Some(index) {
            None
        } else {
            self.last = Some(index);
            Some(index)
        }
    }

    /// Forget the last reported value; the next emit always fires.
    pub(crate) fn reset(&mut self) {
        self.last = None;
    }
}
