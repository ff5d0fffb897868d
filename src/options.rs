use alloc::sync::Arc;

use crate::{ChildAlignment, Orientation, Padding, ParentAlignment, SelectionEvent};

/// Returns the number of spans the item at a position occupies.
///
/// Results outside `1..=span_count` are clamped.
pub type SpanSizeLookup = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// A callback fired for every [`SelectionEvent`].
pub type SelectionCallback = Arc<dyn Fn(SelectionEvent) + Send + Sync>;

/// Configuration for [`crate::PivotLayout`].
///
/// This type is cheap to clone: closures are stored in `Arc`s so hosts can tweak a field and
/// hand the options back without reallocating them.
pub struct LayoutOptions {
    pub orientation: Orientation,
    /// Lays out the first item at the bottom (vertical) or trailing edge (horizontal).
    pub reverse_layout: bool,
    /// Mirrors the horizontal axis.
    pub right_to_left: bool,

    /// Number of lanes. `1` is a plain list.
    pub span_count: usize,
    /// `None` gives every item a single span.
    pub span_size_lookup: Option<SpanSizeLookup>,

    /// Space between lines, along the scroll axis.
    pub item_spacing: i32,
    pub padding: Padding,

    /// Extra space laid out (and retained) before the head edge of the viewport.
    pub extra_layout_space_start: i32,
    /// Extra space laid out (and retained) after the tail edge of the viewport.
    pub extra_layout_space_end: i32,

    /// Upper bound on queued smooth navigation steps. Values below `1` are treated as `1`.
    pub max_pending_moves: i32,

    /// Lays out removed and moved-away items past the edges during data-set changes so hosts can
    /// animate them out. They are reported in [`crate::LayoutReport`] and released afterwards.
    pub layout_disappearing_items: bool,

    pub parent_alignment: ParentAlignment,
    pub child_alignment: ChildAlignment,

    pub on_selection: Option<SelectionCallback>,
}

impl Clone for LayoutOptions {
    fn clone(&self) -> Self {
        Self {
            orientation: self.orientation,
            reverse_layout: self.reverse_layout,
            right_to_left: self.right_to_left,
            span_count: self.span_count,
            span_size_lookup: self.span_size_lookup.clone(),
            item_spacing: self.item_spacing,
            padding: self.padding,
            extra_layout_space_start: self.extra_layout_space_start,
            extra_layout_space_end: self.extra_layout_space_end,
            max_pending_moves: self.max_pending_moves,
            layout_disappearing_items: self.layout_disappearing_items,
            parent_alignment: self.parent_alignment,
            child_alignment: self.child_alignment,
            on_selection: self.on_selection.clone(),
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new(Orientation::Vertical)
    }
}

impl LayoutOptions {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            reverse_layout: false,
            right_to_left: false,
            span_count: 1,
            span_size_lookup: None,
            item_spacing: 0,
            padding: Padding::default(),
            extra_layout_space_start: 0,
            extra_layout_space_end: 0,
            max_pending_moves: 10,
            layout_disappearing_items: false,
            parent_alignment: ParentAlignment::default(),
            child_alignment: ChildAlignment::default(),
            on_selection: None,
        }
    }

    /// Creates options for a vertical grid.
    pub fn grid(span_count: usize) -> Self {
        Self::new(Orientation::Vertical).with_span_count(span_count)
    }

    pub fn with_reverse_layout(mut self, reverse_layout: bool) -> Self {
        self.reverse_layout = reverse_layout;
        self
    }

    pub fn with_right_to_left(mut self, right_to_left: bool) -> Self {
        self.right_to_left = right_to_left;
        self
    }

    pub fn with_span_count(mut self, span_count: usize) -> Self {
        self.span_count = span_count;
        self
    }

    pub fn with_span_size_lookup(
        mut self,
        lookup: Option<impl Fn(usize) -> usize + Send + Sync + 'static>,
    ) -> Self {
        self.span_size_lookup = lookup.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_item_spacing(mut self, item_spacing: i32) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_extra_layout_space(mut self, start: i32, end: i32) -> Self {
        self.extra_layout_space_start = start;
        self.extra_layout_space_end = end;
        self
    }

    pub fn with_max_pending_moves(mut self, max_pending_moves: i32) -> Self {
        self.max_pending_moves = max_pending_moves;
        self
    }

    pub fn with_layout_disappearing_items(mut self, enabled: bool) -> Self {
        self.layout_disappearing_items = enabled;
        self
    }

    pub fn with_parent_alignment(mut self, alignment: ParentAlignment) -> Self {
        self.parent_alignment = alignment;
        self
    }

    pub fn with_child_alignment(mut self, alignment: ChildAlignment) -> Self {
        self.child_alignment = alignment;
        self
    }

    pub fn with_on_selection(
        mut self,
        on_selection: Option<impl Fn(SelectionEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_selection = on_selection.map(|f| Arc::new(f) as _);
        self
    }

    /// Clamps cosmetic values into range.
    pub(crate) fn sanitized(mut self) -> Self {
        self.item_spacing = self.item_spacing.max(0);
        self.extra_layout_space_start = self.extra_layout_space_start.max(0);
        self.extra_layout_space_end = self.extra_layout_space_end.max(0);
        self.max_pending_moves = self.max_pending_moves.max(1);
        self
    }
}

impl core::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("orientation", &self.orientation)
            .field("reverse_layout", &self.reverse_layout)
            .field("right_to_left", &self.right_to_left)
            .field("span_count", &self.span_count)
            .field("item_spacing", &self.item_spacing)
            .field("padding", &self.padding)
            .field("extra_layout_space_start", &self.extra_layout_space_start)
            .field("extra_layout_space_end", &self.extra_layout_space_end)
            .field("max_pending_moves", &self.max_pending_moves)
            .field("layout_disappearing_items", &self.layout_disappearing_items)
            .field("parent_alignment", &self.parent_alignment)
            .field("child_alignment", &self.child_alignment)
            .finish_non_exhaustive()
    }
}
