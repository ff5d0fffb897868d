/// Queued smooth navigation steps that the viewport has not caught up with yet.
///
/// Counters are in position terms: positive moves head toward higher positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingScrollMovements {
    pending_moves: i32,
    max_pending_moves: i32,
    reached_start: bool,
    reached_end: bool,
}

impl Default for PendingScrollMovements {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PendingScrollMovements {
    pub fn new(max_pending_moves: i32) -> Self {
        Self {
            pending_moves: 0,
            max_pending_moves: max_pending_moves.max(1),
            reached_start: false,
            reached_end: false,
        }
    }

    pub fn pending_moves(&self) -> i32 {
        self.pending_moves
    }

    pub fn max_pending_moves(&self) -> i32 {
        self.max_pending_moves
    }

    /// Values below `1` are treated as `1`; the current counter is clamped to the new bound.
    pub fn set_max_pending_moves(&mut self, max_pending_moves: i32) {
        self.max_pending_moves = max_pending_moves.max(1);
        self.pending_moves = self
            .pending_moves
            .clamp(-self.max_pending_moves, self.max_pending_moves);
    }

    pub fn increase(&mut self) {
        if self.pending_moves < self.max_pending_moves {
            self.pending_moves += 1;
        }
    }

    pub fn decrease(&mut self) {
        if self.pending_moves > -self.max_pending_moves {
            self.pending_moves -= 1;
        }
    }

    /// Moves the counter one step toward zero. Returns `false` when nothing was pending.
    pub fn consume(&mut self) -> bool {
        match self.pending_moves {
            0 => false,
            n if n > 0 => {
                self.pending_moves -= 1;
                true
            }
            _ => {
                self.pending_moves += 1;
                true
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending_moves != 0
    }

    pub fn reset(&mut self) {
        self.pending_moves = 0;
    }

    /// Records whether the first and last positions are laid out.
    pub fn set_edges(&mut self, reached_start: bool, reached_end: bool) {
        self.reached_start = reached_start;
        self.reached_end = reached_end;
    }

    pub fn should_stop_scrolling(&self) -> bool {
        (self.pending_moves > 0 && self.reached_end)
            || (self.pending_moves < 0 && self.reached_start)
            || self.pending_moves == 0
    }

    /// Whether scrolling to `view_position` agrees with the outstanding movement.
    pub fn should_scroll_to_view(&self, view_position: usize, pivot_position: usize) -> bool {
        match self.pending_moves {
            0 => true,
            n if n > 0 => view_position >= pivot_position,
            _ => view_position <= pivot_position,
        }
    }
}
