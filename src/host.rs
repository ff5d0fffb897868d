use crate::{ChildAlignment, MeasureSpec, Size, ViewBounds};

/// An item materialized by the host: the only view capability the engine depends on.
pub trait ItemHandle {
    /// Measures the item under the given constraints.
    fn measure(&mut self, spec: MeasureSpec) -> Size;

    fn bounds(&self) -> ViewBounds;

    fn set_bounds(&mut self, bounds: ViewBounds);

    /// Focused items are never recycled.
    fn has_focus(&self) -> bool {
        false
    }

    /// Alignments of the focusable sub-regions of this item, one per sub-position.
    ///
    /// Empty means the item has a single sub-position aligned with the layout's child alignment.
    fn sub_position_alignments(&self) -> &[ChildAlignment] {
        &[]
    }

    /// Bounds of a sub-view, in the same coordinate space as [`ItemHandle::bounds`].
    fn sub_view_bounds(&self, view_id: u32) -> Option<ViewBounds> {
        let _ = view_id;
        None
    }
}

/// The host's recycling pool.
///
/// The pool is owned by the host and passed into every call that may attach or detach items.
pub trait RecyclerPool {
    type Item: ItemHandle;

    fn item_count(&self) -> usize;

    /// Returns an item bound to `position`, reusing a released one when possible.
    fn acquire(&mut self, position: usize) -> Self::Item;

    fn release(&mut self, item: Self::Item);
}
