use thiserror::Error;

/// A configuration value was rejected when it was applied.
///
/// Cosmetic values (spacing, extra layout space, `max_pending_moves`) are clamped instead of
/// rejected; only values that would make the geometry meaningless end up here.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// An alignment ratio was outside `[0, 1]` (or not a number).
    #[error("alignment ratio must be within [0, 1], got {0}")]
    InvalidRatio(f32),
    /// A grid was configured with zero spans.
    #[error("span count must be at least 1")]
    InvalidSpanCount,
}

/// A [`crate::ViewProvider`] was driven outside of its contract.
///
/// These indicate a logic bug in the caller (or in the engine) rather than transient state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// `next()` was called without a preceding successful `has_next()`.
    #[error("next() called without a successful has_next()")]
    NextWithoutHasNext,
    /// The cursor points outside of `0..item_count`.
    #[error("no item at position {position} (item_count={item_count})")]
    OutOfRange {
        /// Cursor position at the time of the call.
        position: isize,
        /// Number of items in the data set.
        item_count: usize,
    },
}
