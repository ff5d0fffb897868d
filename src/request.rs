use crate::LayoutDirection;

/// A fill cursor: "lay out from `current_offset` at `current_position`, moving in `direction`,
/// until `available_space` is used up".
///
/// Requests are created for one fill and discarded afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutRequest {
    /// May be negative (or past the data set) once the cursor walks off an edge.
    pub current_position: isize,
    /// Flow offset of the next line edge: its start when filling toward the end, its end when
    /// filling toward the start.
    pub current_offset: i32,
    pub available_space: i32,
    pub direction: LayoutDirection,
    pub item_step: isize,
    /// Set when the fill stopped because no further item exists.
    pub exhausted: bool,
}

impl LayoutRequest {
    pub fn new(
        current_position: isize,
        current_offset: i32,
        available_space: i32,
        direction: LayoutDirection,
    ) -> Self {
        Self {
            current_position,
            current_offset,
            available_space,
            direction,
            item_step: direction.item_step(),
            exhausted: false,
        }
    }

    pub fn position_in(&self, item_count: usize) -> Option<usize> {
        usize::try_from(self.current_position)
            .ok()
            .filter(|&p| p < item_count)
    }

    pub fn advance(&mut self) {
        self.current_position += self.item_step;
    }

    /// Points the cursor at `position` without changing the direction.
    pub fn seek(&mut self, position: usize) {
        self.current_position = isize::try_from(position).unwrap_or(isize::MAX);
    }
}

/// Per-engine layout facts updated by every pass and scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutState {
    pub item_count: usize,
    /// Space laid out before the head edge, including look-ahead.
    pub extra_space_start: i32,
    /// Space laid out after the tail edge, including look-ahead.
    pub extra_space_end: i32,
    /// The first position is laid out.
    pub reached_start: bool,
    /// The last position is laid out.
    pub reached_end: bool,
}
