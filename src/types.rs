use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Items flow top to bottom (or bottom to top when reversed).
    #[default]
    Vertical,
    /// Items flow left to right (or right to left when reversed or right-to-left).
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Direction in which a layout pass or scroll fills new items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    /// Toward the head of the layout (lower positions).
    Start,
    /// Toward the tail of the layout (higher positions).
    End,
}

impl LayoutDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }

    /// Position step when walking the adapter in this direction.
    pub fn item_step(self) -> isize {
        match self {
            Self::Start => -1,
            Self::End => 1,
        }
    }
}

/// Axis-aligned bounds of a laid out item, in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ViewBounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Constraints handed to [`crate::ItemHandle::measure`].
///
/// `Some(v)` is an exact size; `None` leaves the item free to pick its size on that axis.
/// The engine always fixes the cross axis (lane width) and leaves the scroll axis open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeasureSpec {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Viewport padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// The current selection and its laid out extent along the scroll axis.
///
/// `head_offset`/`tail_offset` are measured from the head edge of the viewport in the direction
/// items flow, so they stay meaningful for reversed and right-to-left layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PivotInfo {
    pub position: usize,
    pub sub_position: usize,
    pub head_offset: i32,
    pub tail_offset: i32,
}

/// A data-set change applied at the start of [`crate::PivotLayout::layout_children`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemChange {
    Inserted { position: usize, count: usize },
    Removed { position: usize, count: usize },
    Moved { from: usize, to: usize },
    /// Items whose content changed in place; they are re-acquired instead of reused.
    Changed { position: usize, count: usize },
}

/// What happened to a position across one [`ItemChange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Remapped {
    Kept(usize),
    Changed(usize),
    Removed(usize),
}

impl ItemChange {
    /// Maps an old adapter position through this change.
    ///
    /// Removed positions report the position that now occupies their slot.
    pub(crate) fn remap(&self, position: usize) -> Remapped {
        match *self {
            Self::Inserted { position: at, count } => {
                if position >= at {
                    Remapped::Kept(position + count)
                } else {
                    Remapped::Kept(position)
                }
            }
            Self::Removed { position: at, count } => {
                if position < at {
                    Remapped::Kept(position)
                } else if position < at + count {
                    Remapped::Removed(at)
                } else {
                    Remapped::Kept(position - count)
                }
            }
            Self::Moved { from, to } => {
                if position == from {
                    Remapped::Kept(to)
                } else if from < to && position > from && position <= to {
                    Remapped::Kept(position - 1)
                } else if to < from && position >= to && position < from {
                    Remapped::Kept(position + 1)
                } else {
                    Remapped::Kept(position)
                }
            }
            Self::Changed { position: at, count } => {
                if position >= at && position < at + count {
                    Remapped::Changed(position)
                } else {
                    Remapped::Kept(position)
                }
            }
        }
    }
}

/// Two-phase selection notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionEvent {
    /// The pivot changed. Fired synchronously, once per change.
    Selected { position: usize, sub_position: usize },
    /// The latest selection finished aligning to the keyline.
    SelectedAndAligned { position: usize, sub_position: usize },
}

/// An item laid out past the edges for a disappearing animation, then released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisappearingItem {
    pub position: usize,
    pub bounds: ViewBounds,
}

/// Summary of one layout pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub pivot: Option<PivotInfo>,
    /// Number of items attached after the pass (after recycling).
    pub attached: usize,
    pub disappearing: Vec<DisappearingItem>,
    pub reached_start: bool,
    pub reached_end: bool,
}
